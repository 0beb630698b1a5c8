//! Minimal server-rendered HTML.
//!
//! Presentation is a thin collaborator: every function here is a pure
//! `data -> markup` mapping. All interpolated user data goes through
//! [`escape`].

use railtrace_core::models::cargo::{Cargo, CargoWithTrain};
use railtrace_core::models::train::Train;

use crate::tracking::TrackRecord;

/// HTML-escape untrusted text.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn opt(value: &Option<String>) -> String {
    escape(value.as_deref().unwrap_or(""))
}

fn opt_int(value: &Option<i64>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{} — Railtrace</title></head>\n<body>\n\
         <nav><a href=\"/\">Home</a> | <a href=\"/about\">About</a> | \
         <a href=\"/track\">Track</a> | <a href=\"/contact\">Contact</a> | \
         <a href=\"/admin\">Admin</a></nav>\n<h1>{}</h1>\n{}\n</body>\n</html>\n",
        escape(title),
        escape(title),
        body
    )
}

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    format!("<ul class=\"errors\">{items}</ul>")
}

// -----------------------------------------------------------------------
// Public pages
// -----------------------------------------------------------------------

pub fn index_page() -> String {
    layout(
        "Train & Cargo Tracking",
        "<p>Track trains and cargo shipments by their numeric identifier, \
         or contact us with any question.</p>",
    )
}

pub fn about_page() -> String {
    layout(
        "About",
        "<p>Railtrace keeps shippers informed about where their trains \
         and cargo are right now.</p>",
    )
}

pub fn notice(title: &str, message: &str) -> String {
    layout(title, &format!("<p>{}</p>", escape(message)))
}

// -----------------------------------------------------------------------
// Contact
// -----------------------------------------------------------------------

pub fn contact_page(name: &str, email: &str, message: &str, errors: &[String]) -> String {
    let body = format!(
        "{}\
         <form method=\"post\" action=\"/contact\">\
         <label>Name <input name=\"name\" value=\"{}\"></label><br>\
         <label>E-mail <input name=\"email\" value=\"{}\"></label><br>\
         <label>Message <textarea name=\"message\">{}</textarea></label><br>\
         <button type=\"submit\">Send</button>\
         </form>",
        error_list(errors),
        escape(name),
        escape(email),
        escape(message),
    );
    layout("Contact us", &body)
}

pub fn contact_success_page(name: &str) -> String {
    layout(
        "Message sent",
        &format!(
            "<p>Thank you, {}! We will get back to you shortly.</p>",
            escape(name)
        ),
    )
}

// -----------------------------------------------------------------------
// Tracking
// -----------------------------------------------------------------------

pub fn track_page(errors: &[String]) -> String {
    let body = format!(
        "{}\
         <form method=\"post\" action=\"/track\">\
         <label>Search for \
         <select name=\"search_type\">\
         <option value=\"train\">Train</option>\
         <option value=\"cargo\">Cargo</option>\
         </select></label> \
         <label>Identifier <input name=\"identifier\"></label> \
         <button type=\"submit\">Track</button>\
         </form>",
        error_list(errors),
    );
    layout("Track", &body)
}

fn train_details(train: &Train) -> String {
    format!(
        "<dl>\
         <dt>Train</dt><dd>{} (#{})</dd>\
         <dt>Route</dt><dd>{} → {}</dd>\
         <dt>Departure</dt><dd>{}</dd>\
         <dt>Arrival</dt><dd>{}</dd>\
         <dt>Last operation</dt><dd>{} at {} ({})</dd>\
         <dt>Distance to arrival</dt><dd>{} km</dd>\
         </dl>",
        escape(&train.name),
        train.train_id,
        opt(&train.departure_station),
        opt(&train.arrival_station),
        opt(&train.departure_time),
        opt(&train.arrival_time),
        opt(&train.operation_desc),
        opt(&train.last_operation_station),
        opt(&train.last_operation_time),
        opt_int(&train.distance_to_arrival),
    )
}

fn cargo_details(cargo: &Cargo) -> String {
    format!(
        "<dl>\
         <dt>Cargo</dt><dd>{} (#{})</dd>\
         <dt>Status</dt><dd>{}</dd>\
         <dt>Current station</dt><dd>{}</dd>\
         <dt>Next station</dt><dd>{}</dd>\
         <dt>Last stop</dt><dd>{}</dd>\
         <dt>Last operation</dt><dd>{}</dd>\
         <dt>Distance to arrival</dt><dd>{} km</dd>\
         </dl>",
        opt(&cargo.cargo_type),
        cargo.cargo_id,
        opt(&cargo.status),
        opt(&cargo.current_station),
        opt(&cargo.next_station),
        opt(&cargo.last_stop_time),
        opt(&cargo.last_operation),
        opt_int(&cargo.distance_to_arrival),
    )
}

pub fn track_result_page(record: &TrackRecord) -> String {
    let body = match record {
        TrackRecord::Train(train) => train_details(train),
        TrackRecord::Cargo(CargoWithTrain { cargo, train }) => {
            let mut body = cargo_details(cargo);
            match train {
                Some(train) => body.push_str(&train_details(train)),
                None => body.push_str("<p>Not currently assigned to a train.</p>"),
            }
            body
        }
    };
    layout("Tracking result", &body)
}

pub fn track_not_found_page() -> String {
    layout(
        "Tracking result",
        "<p>Nothing found for that identifier. Check the number and try again.</p>",
    )
}

// -----------------------------------------------------------------------
// Login / admin
// -----------------------------------------------------------------------

pub fn login_page(next: &str, errors: &[String]) -> String {
    let body = format!(
        "{}\
         <form method=\"post\" action=\"/login\">\
         <label>Username <input name=\"username\"></label><br>\
         <label>Password <input type=\"password\" name=\"password\"></label><br>\
         <input type=\"hidden\" name=\"next\" value=\"{}\">\
         <button type=\"submit\">Log in</button>\
         </form>",
        error_list(errors),
        escape(next),
    );
    layout("Log in", &body)
}

pub fn admin_dashboard_page(username: &str) -> String {
    let body = format!(
        "<p>Signed in as {}.</p>\
         <ul>\
         <li><a href=\"/admin/trains\">Manage trains</a></li>\
         <li><a href=\"/admin/cargos\">Manage cargo</a></li>\
         <li><a href=\"/logout\">Log out</a></li>\
         </ul>",
        escape(username),
    );
    layout("Admin dashboard", &body)
}

pub fn train_list_page(trains: &[Train]) -> String {
    let rows: String = trains
        .iter()
        .map(|t| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td><a href=\"/admin/trains/edit/{}\">Edit</a> \
                 <form method=\"post\" action=\"/admin/trains/delete/{}\" style=\"display:inline\">\
                 <button type=\"submit\">Delete</button></form></td></tr>",
                t.train_id,
                escape(&t.name),
                opt(&t.departure_station),
                opt(&t.arrival_station),
                t.train_id,
                t.train_id,
            )
        })
        .collect();
    let body = format!(
        "<p><a href=\"/admin/trains/add\">Add train</a></p>\
         <table border=\"1\">\
         <tr><th>Id</th><th>Name</th><th>From</th><th>To</th><th></th></tr>\
         {rows}</table>",
    );
    layout("Trains", &body)
}

pub fn train_form_page(
    title: &str,
    action: &str,
    train: Option<&Train>,
    errors: &[String],
) -> String {
    let field = |label: &str, name: &str, value: &str| {
        format!(
            "<label>{} <input name=\"{}\" value=\"{}\"></label><br>",
            escape(label),
            name,
            escape(value),
        )
    };
    let t = train;
    let get = |f: fn(&Train) -> String| t.map(f).unwrap_or_default();
    let body = format!(
        "{}<form method=\"post\" action=\"{}\">{}{}{}{}{}{}{}{}{}\
         <button type=\"submit\">Save</button></form>",
        error_list(errors),
        escape(action),
        field("Name", "name", &get(|t| t.name.clone())),
        field(
            "Departure station",
            "departure_station",
            &get(|t| t.departure_station.clone().unwrap_or_default()),
        ),
        field(
            "Arrival station",
            "arrival_station",
            &get(|t| t.arrival_station.clone().unwrap_or_default()),
        ),
        field(
            "Departure time",
            "departure_time",
            &get(|t| t.departure_time.clone().unwrap_or_default()),
        ),
        field(
            "Arrival time",
            "arrival_time",
            &get(|t| t.arrival_time.clone().unwrap_or_default()),
        ),
        field(
            "Last operation station",
            "last_operation_station",
            &get(|t| t.last_operation_station.clone().unwrap_or_default()),
        ),
        field(
            "Last operation time",
            "last_operation_time",
            &get(|t| t.last_operation_time.clone().unwrap_or_default()),
        ),
        field(
            "Distance to arrival (km)",
            "distance_to_arrival",
            &get(|t| opt_int(&t.distance_to_arrival)),
        ),
        field(
            "Operation description",
            "operation_desc",
            &get(|t| t.operation_desc.clone().unwrap_or_default()),
        ),
    );
    layout(title, &body)
}

pub fn cargo_list_page(items: &[CargoWithTrain]) -> String {
    let rows: String = items
        .iter()
        .map(|item| {
            let train_label = item
                .train
                .as_ref()
                .map(|t| format!("{} (#{})", escape(&t.name), t.train_id))
                .unwrap_or_else(|| "—".into());
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td><a href=\"/admin/cargos/edit/{}\">Edit</a> \
                 <form method=\"post\" action=\"/admin/cargos/delete/{}\" style=\"display:inline\">\
                 <button type=\"submit\">Delete</button></form></td></tr>",
                item.cargo.cargo_id,
                opt(&item.cargo.cargo_type),
                train_label,
                opt(&item.cargo.status),
                item.cargo.cargo_id,
                item.cargo.cargo_id,
            )
        })
        .collect();
    let body = format!(
        "<p><a href=\"/admin/cargos/add\">Add cargo</a></p>\
         <table border=\"1\">\
         <tr><th>Id</th><th>Type</th><th>Train</th><th>Status</th><th></th></tr>\
         {rows}</table>",
    );
    layout("Cargo", &body)
}

pub fn cargo_form_page(
    title: &str,
    action: &str,
    cargo: Option<&Cargo>,
    errors: &[String],
) -> String {
    let field = |label: &str, name: &str, value: &str| {
        format!(
            "<label>{} <input name=\"{}\" value=\"{}\"></label><br>",
            escape(label),
            name,
            escape(value),
        )
    };
    let c = cargo;
    let get = |f: fn(&Cargo) -> String| c.map(f).unwrap_or_default();
    let body = format!(
        "{}<form method=\"post\" action=\"{}\">{}{}{}{}{}{}{}{}\
         <button type=\"submit\">Save</button></form>",
        error_list(errors),
        escape(action),
        field(
            "Cargo type",
            "cargo_type",
            &get(|c| c.cargo_type.clone().unwrap_or_default()),
        ),
        field("Train id", "train_id", &get(|c| opt_int(&c.train_id))),
        field(
            "Current station",
            "current_station",
            &get(|c| c.current_station.clone().unwrap_or_default()),
        ),
        field("Status", "status", &get(|c| c.status.clone().unwrap_or_default())),
        field(
            "Last stop time",
            "last_stop_time",
            &get(|c| c.last_stop_time.clone().unwrap_or_default()),
        ),
        field(
            "Next station",
            "next_station",
            &get(|c| c.next_station.clone().unwrap_or_default()),
        ),
        field(
            "Distance to arrival (km)",
            "distance_to_arrival",
            &get(|c| opt_int(&c.distance_to_arrival)),
        ),
        field(
            "Last operation",
            "last_operation",
            &get(|c| c.last_operation.clone().unwrap_or_default()),
        ),
    );
    layout(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape("<script>\"&'</script>"),
            "&lt;script&gt;&quot;&amp;&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn pages_escape_user_data() {
        let page = contact_success_page("<b>Bob</b>");
        assert!(page.contains("&lt;b&gt;Bob&lt;/b&gt;"));
        assert!(!page.contains("<b>Bob</b>"));
    }
}

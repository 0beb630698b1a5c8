//! Form payloads and validation.
//!
//! Every POST body lands in one of these structs as raw text; the
//! conversion methods normalize empty fields to `None`, parse numeric
//! fields, and collect per-field validation messages for inline
//! display. No write is attempted unless conversion succeeds.

use railtrace_core::models::cargo::{CreateCargo, UpdateCargo};
use railtrace_core::models::contact::CreateContact;
use railtrace_core::models::train::{CreateTrain, UpdateTrain};
use serde::Deserialize;

const NAME_MAX_LEN: usize = 100;

/// Empty or whitespace-only input counts as absent.
fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse an optional integer field, reporting the field name on
/// failure.
fn optional_int(field: &str, value: &str, errors: &mut Vec<String>) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(n) => Some(n),
        Err(_) => {
            errors.push(format!("{field} must be a whole number"));
            None
        }
    }
}

/// Minimal syntactic email check: one `@`, a non-empty local part,
/// and a dotted domain.
fn is_valid_email(value: &str) -> bool {
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let Some(domain) = parts.next() else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

// -----------------------------------------------------------------------
// Login
// -----------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Destination to return to after login, if the user was
    /// redirected here.
    #[serde(default)]
    pub next: String,
}

impl LoginForm {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.username.trim().is_empty() {
            errors.push("Enter a username".into());
        }
        if self.password.is_empty() {
            errors.push("Enter a password".into());
        }
        errors
    }
}

// -----------------------------------------------------------------------
// Tracking
// -----------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct TrackForm {
    #[serde(default)]
    pub search_type: String,
    #[serde(default)]
    pub identifier: String,
}

// -----------------------------------------------------------------------
// Contact
// -----------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    pub fn into_create(self) -> Result<CreateContact, Vec<String>> {
        let mut errors = Vec::new();

        let name = self.name.trim().to_string();
        if name.is_empty() {
            errors.push("Enter your name".into());
        }

        let email = self.email.trim().to_string();
        if !is_valid_email(&email) {
            errors.push("Enter a valid e-mail address".into());
        }

        let message = self.message.trim().to_string();
        if message.is_empty() {
            errors.push("Enter a message".into());
        }

        if errors.is_empty() {
            Ok(CreateContact {
                name,
                email,
                message,
            })
        } else {
            Err(errors)
        }
    }
}

// -----------------------------------------------------------------------
// Train
// -----------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub departure_station: String,
    #[serde(default)]
    pub arrival_station: String,
    #[serde(default)]
    pub departure_time: String,
    #[serde(default)]
    pub arrival_time: String,
    #[serde(default)]
    pub last_operation_station: String,
    #[serde(default)]
    pub last_operation_time: String,
    #[serde(default)]
    pub distance_to_arrival: String,
    #[serde(default)]
    pub operation_desc: String,
}

impl TrainForm {
    fn validated_name(&self, errors: &mut Vec<String>) -> String {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            errors.push("Enter a train name".into());
        } else if name.len() > NAME_MAX_LEN {
            errors.push(format!("Train name must be at most {NAME_MAX_LEN} characters"));
        }
        name
    }

    pub fn into_create(self) -> Result<CreateTrain, Vec<String>> {
        let mut errors = Vec::new();
        let name = self.validated_name(&mut errors);
        let distance_to_arrival =
            optional_int("Distance to arrival", &self.distance_to_arrival, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CreateTrain {
            name,
            departure_station: optional(self.departure_station),
            arrival_station: optional(self.arrival_station),
            departure_time: optional(self.departure_time),
            arrival_time: optional(self.arrival_time),
            last_operation_station: optional(self.last_operation_station),
            last_operation_time: optional(self.last_operation_time),
            distance_to_arrival,
            operation_desc: optional(self.operation_desc),
        })
    }

    /// Full replacement: the edit form posts every field back.
    pub fn into_update(self) -> Result<UpdateTrain, Vec<String>> {
        let mut errors = Vec::new();
        let name = self.validated_name(&mut errors);
        let distance_to_arrival =
            optional_int("Distance to arrival", &self.distance_to_arrival, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(UpdateTrain {
            name: Some(name),
            departure_station: Some(optional(self.departure_station)),
            arrival_station: Some(optional(self.arrival_station)),
            departure_time: Some(optional(self.departure_time)),
            arrival_time: Some(optional(self.arrival_time)),
            last_operation_station: Some(optional(self.last_operation_station)),
            last_operation_time: Some(optional(self.last_operation_time)),
            distance_to_arrival: Some(distance_to_arrival),
            operation_desc: Some(optional(self.operation_desc)),
        })
    }
}

// -----------------------------------------------------------------------
// Cargo
// -----------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CargoForm {
    #[serde(default)]
    pub cargo_type: String,
    #[serde(default)]
    pub train_id: String,
    #[serde(default)]
    pub current_station: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub last_stop_time: String,
    #[serde(default)]
    pub next_station: String,
    #[serde(default)]
    pub distance_to_arrival: String,
    #[serde(default)]
    pub last_operation: String,
}

impl CargoForm {
    pub fn into_create(self) -> Result<CreateCargo, Vec<String>> {
        let mut errors = Vec::new();
        let train_id = optional_int("Train id", &self.train_id, &mut errors);
        let distance_to_arrival =
            optional_int("Distance to arrival", &self.distance_to_arrival, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CreateCargo {
            cargo_type: optional(self.cargo_type),
            train_id,
            current_station: optional(self.current_station),
            status: optional(self.status),
            last_stop_time: optional(self.last_stop_time),
            next_station: optional(self.next_station),
            distance_to_arrival,
            last_operation: optional(self.last_operation),
        })
    }

    /// Full replacement: the edit form posts every field back.
    pub fn into_update(self) -> Result<UpdateCargo, Vec<String>> {
        let mut errors = Vec::new();
        let train_id = optional_int("Train id", &self.train_id, &mut errors);
        let distance_to_arrival =
            optional_int("Distance to arrival", &self.distance_to_arrival, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(UpdateCargo {
            cargo_type: Some(optional(self.cargo_type)),
            train_id: Some(train_id),
            current_station: Some(optional(self.current_station)),
            status: Some(optional(self.status)),
            last_stop_time: Some(optional(self.last_stop_time)),
            next_station: Some(optional(self.next_station)),
            distance_to_arrival: Some(distance_to_arrival),
            last_operation: Some(optional(self.last_operation)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_requires_all_fields() {
        let errors = ContactForm::default().into_create().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn contact_rejects_bad_email() {
        let form = ContactForm {
            name: "Aigerim".into(),
            email: "not-an-address".into(),
            message: "Where is my shipment?".into(),
        };
        let errors = form.into_create().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("e-mail"));
    }

    #[test]
    fn contact_accepts_valid_input() {
        let form = ContactForm {
            name: "  Aigerim ".into(),
            email: "aigerim@example.com".into(),
            message: "Where is my shipment?".into(),
        };
        let contact = form.into_create().unwrap();
        assert_eq!(contact.name, "Aigerim");
    }

    #[test]
    fn email_syntax_edge_cases() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@co."));
    }

    #[test]
    fn train_requires_name() {
        let errors = TrainForm::default().into_create().unwrap_err();
        assert_eq!(errors, vec!["Enter a train name".to_string()]);
    }

    #[test]
    fn train_name_length_is_bounded() {
        let form = TrainForm {
            name: "x".repeat(NAME_MAX_LEN + 1),
            ..Default::default()
        };
        let errors = form.into_create().unwrap_err();
        assert!(errors[0].contains("at most"));
    }

    #[test]
    fn train_distance_must_be_numeric() {
        let form = TrainForm {
            name: "KZ-001".into(),
            distance_to_arrival: "far".into(),
            ..Default::default()
        };
        let errors = form.into_create().unwrap_err();
        assert!(errors[0].contains("whole number"));
    }

    #[test]
    fn train_empty_fields_become_none() {
        let form = TrainForm {
            name: "KZ-001".into(),
            departure_station: "   ".into(),
            arrival_station: "Astana".into(),
            distance_to_arrival: " 350 ".into(),
            ..Default::default()
        };
        let create = form.into_create().unwrap();
        assert_eq!(create.departure_station, None);
        assert_eq!(create.arrival_station.as_deref(), Some("Astana"));
        assert_eq!(create.distance_to_arrival, Some(350));
    }

    #[test]
    fn cargo_train_id_must_be_numeric() {
        let form = CargoForm {
            train_id: "one".into(),
            ..Default::default()
        };
        let errors = form.into_create().unwrap_err();
        assert!(errors[0].contains("Train id"));
    }

    #[test]
    fn cargo_update_replaces_every_field() {
        let form = CargoForm {
            cargo_type: "Grain".into(),
            train_id: "2".into(),
            ..Default::default()
        };
        let update = form.into_update().unwrap();
        assert_eq!(update.cargo_type, Some(Some("Grain".into())));
        assert_eq!(update.train_id, Some(Some(2)));
        // Blank fields clear the stored value on full replacement.
        assert_eq!(update.status, Some(None));
    }

    #[test]
    fn login_requires_credentials() {
        let form = LoginForm {
            username: "".into(),
            password: "".into(),
            next: "".into(),
        };
        assert_eq!(form.validate().len(), 2);
    }
}

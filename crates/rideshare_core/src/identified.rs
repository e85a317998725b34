use std::fmt;

use crate::error::DispatchError;

/// Raw entity identifier as it appears in the records. Valid ids are strictly positive.
pub type Id = i64;

/// The three kinds of entity held by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Driver,
    Passenger,
    Trip,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Driver => "driver",
            EntityKind::Passenger => "passenger",
            EntityKind::Trip => "trip",
        };
        f.write_str(label)
    }
}

/// Anything carrying a stable positive identifier.
pub trait Identified {
    fn id(&self) -> Id;

    fn kind(&self) -> EntityKind;
}

/// Shared construction check for every entity id.
pub fn validate_id(kind: EntityKind, id: Id) -> Result<Id, DispatchError> {
    if id <= 0 {
        return Err(DispatchError::Validation(format!(
            "{kind} id must be positive, got {id}"
        )));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_ids_pass_through() {
        assert_eq!(validate_id(EntityKind::Driver, 1).unwrap(), 1);
        assert_eq!(validate_id(EntityKind::Trip, 980_999).unwrap(), 980_999);
    }

    #[test]
    fn zero_and_negative_ids_are_rejected() {
        for id in [0, -1, i64::MIN] {
            let err = validate_id(EntityKind::Passenger, id).unwrap_err();
            assert!(err.is_validation(), "id {id} should be a validation error");
        }
    }

    #[test]
    fn entities_report_id_and_kind() {
        use std::rc::Rc;

        use crate::test_helpers::{test_driver, test_passenger, test_time};
        use crate::trip::Trip;

        let driver = test_driver(2);
        let passenger = test_passenger(5);
        let trip = Rc::new(
            Trip::builder(9, test_time("2018-01-01T00:00:00Z"))
                .driver(&driver)
                .passenger(&passenger)
                .build()
                .unwrap(),
        );

        let entities: [&dyn Identified; 3] = [&driver, &passenger, trip.as_ref()];
        let described: Vec<String> = entities
            .iter()
            .map(|entity| format!("{} {}", entity.kind(), entity.id()))
            .collect();
        assert_eq!(described, ["driver 2", "passenger 5", "trip 9"]);
    }

    #[test]
    fn error_message_names_the_entity() {
        let err = validate_id(EntityKind::Trip, 0).unwrap_err();
        assert_eq!(err.to_string(), "invalid input: trip id must be positive, got 0");
    }
}

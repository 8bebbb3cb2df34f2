//! Registration contract checks.

use thiserror::Error;

use crate::compiler::declaration::{Capability, Owner, Registration};
use crate::core::manifest::is_valid_scheme;

/// A registration that violates its contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("`{owner}` declares no scheme names")]
    NoSchemes { owner: String },

    #[error("`{owner}` must be public")]
    NotPublic { owner: String },

    #[error("`{scheme}` declared by `{owner}` is not a valid scheme name")]
    InvalidScheme { owner: String, scheme: String },

    #[error("`{owner}` must implement Factory or Connection")]
    MissingCapability { owner: String },

    #[error("`{owner}` must have constructor with URL parameter")]
    MissingUrlConstructor { owner: String },

    #[error("{owner:?} is not a valid implementation identifier")]
    InvalidOwner { owner: String },

    #[error("`{owner}` must be a static function taking a URL and returning a stream")]
    InvalidMethod { owner: String },
}

/// Checks every registration goes through regardless of kind.
pub fn validate_common(registration: &Registration) -> Result<(), ValidationError> {
    let owner = &registration.owner;

    if registration.schemes.is_empty() {
        return Err(ValidationError::NoSchemes {
            owner: owner.path.clone(),
        });
    }

    if !owner.is_public() {
        return Err(ValidationError::NotPublic {
            owner: owner.path.clone(),
        });
    }

    if let Some(scheme) = registration.schemes.iter().find(|s| !is_valid_scheme(s)) {
        return Err(ValidationError::InvalidScheme {
            owner: owner.path.clone(),
            scheme: scheme.clone(),
        });
    }

    if !is_valid_identifier(&owner.path) {
        return Err(ValidationError::InvalidOwner {
            owner: owner.path.clone(),
        });
    }

    Ok(())
}

/// An owner identifier must fit on one manifest line and not read as a
/// comment there.
fn is_valid_identifier(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('#')
        && !path.chars().any(|c| c.is_whitespace() || c.is_control())
}

/// Factory wins over Connection; a Connection also needs its URL constructor.
pub fn validate_type_target(owner: &Owner) -> Result<(), ValidationError> {
    if owner.implements(Capability::Factory) {
        return Ok(());
    }

    if !owner.implements(Capability::Connection) {
        return Err(ValidationError::MissingCapability {
            owner: owner.path.clone(),
        });
    }

    if !owner.has_url_constructor() {
        return Err(ValidationError::MissingUrlConstructor {
            owner: owner.path.clone(),
        });
    }

    Ok(())
}

pub fn validate_method_target(owner: &Owner) -> Result<(), ValidationError> {
    if owner.is_stream_method() {
        Ok(())
    } else {
        Err(ValidationError::InvalidMethod {
            owner: owner.path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::declaration::{TargetKind, Visibility};

    #[test]
    fn test_no_schemes() {
        let reg = Registration::new(Owner::factory("demo::F"), TargetKind::Factory);
        assert!(matches!(
            validate_common(&reg),
            Err(ValidationError::NoSchemes { .. })
        ));
    }

    #[test]
    fn test_not_public() {
        let reg = Registration::new(
            Owner::connection("demo::Hidden").with_visibility(Visibility::Crate),
            TargetKind::Connection,
        )
        .scheme("xyz");

        let err = validate_common(&reg).unwrap_err();
        assert_eq!(err.to_string(), "`demo::Hidden` must be public");
    }

    #[test]
    fn test_invalid_scheme() {
        let reg = Registration::new(Owner::factory("demo::F"), TargetKind::Factory)
            .scheme("ok")
            .scheme("../escape");
        assert_eq!(
            validate_common(&reg).unwrap_err(),
            ValidationError::InvalidScheme {
                owner: "demo::F".to_string(),
                scheme: "../escape".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_owner_identifier() {
        for path in ["", "   ", "#demo::F", "demo::A\ndemo::B", "demo:: F", "demo::\u{0}F"] {
            let reg = Registration::new(Owner::factory(path), TargetKind::Factory).scheme("ok");
            assert_eq!(
                validate_common(&reg),
                Err(ValidationError::InvalidOwner {
                    owner: path.to_string(),
                }),
                "{path:?}"
            );
        }
        let reg = Registration::new(Owner::factory("demo::F$url$x"), TargetKind::Factory)
            .scheme("ok");
        assert!(validate_common(&reg).is_ok());
    }

    #[test]
    fn test_factory_needs_no_url_constructor() {
        assert!(validate_type_target(&Owner::factory("demo::F")).is_ok());
    }

    #[test]
    fn test_missing_capability() {
        let err = validate_type_target(&Owner::new("demo::Plain")).unwrap_err();
        assert!(err.to_string().contains("must implement Factory or Connection"));
    }

    #[test]
    fn test_missing_url_constructor() {
        let owner = Owner::connection("demo::C")
            .without_constructors()
            .with_constructor(["url", "timeout"]);
        let err = validate_type_target(&owner).unwrap_err();
        assert!(err.to_string().contains("must have constructor with URL parameter"));
    }

    #[test]
    fn test_method_shape() {
        assert!(validate_method_target(&Owner::method("demo::hi")).is_ok());
        assert!(matches!(
            validate_method_target(&Owner::connection("demo::C")),
            Err(ValidationError::InvalidMethod { .. })
        ));
    }
}

//! Service identity bound to a logger factory.

use crate::{ConfigError, ServiceName};
use serde::Serialize;

/// Which service a logger belongs to and where its alerts go.
///
/// All four fields are mandatory; the identity cannot change once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceIdentity {
    tag: Box<str>,
    service: Box<str>,
    filename: Box<str>,
    topic_id: u64,
}

impl ServiceIdentity {
    /// Validate and build an identity.
    pub fn new(
        tag: &str,
        service: &str,
        filename: &str,
        topic_id: u64,
    ) -> Result<Self, ConfigError> {
        let tag = required("tag", tag)?;
        let service = required("service", service)?;
        let filename = required("filename", filename)?;
        if filename.contains(['/', '\\']) || &*filename == ".." {
            return Err(ConfigError::InvalidFilename {
                filename: filename.into_string(),
            });
        }
        if topic_id == 0 {
            return Err(ConfigError::MissingIdentityField { field: "topic_id" });
        }

        Ok(Self {
            tag,
            service,
            filename,
            topic_id,
        })
    }

    /// Derive the identity of a registered service (filename = service name).
    pub fn for_service(name: ServiceName) -> Result<Self, ConfigError> {
        let topic_id = name
            .topic_id()
            .ok_or(ConfigError::MissingIdentityField { field: "topic_id" })?;
        Self::new(name.tag(), name.as_str(), name.as_str(), topic_id)
    }

    /// Short service code.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Full service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Log file stem.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Alert topic/thread id.
    #[must_use]
    pub const fn topic_id(&self) -> u64 {
        self.topic_id
    }
}

fn required(field: &'static str, value: &str) -> Result<Box<str>, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingIdentityField { field });
    }
    Ok(trimmed.to_owned().into_boxed_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_requires_every_field() {
        assert_eq!(
            ServiceIdentity::new("", "WberReport", "WberReport", 4),
            Err(ConfigError::MissingIdentityField { field: "tag" })
        );
        assert_eq!(
            ServiceIdentity::new("wber", " ", "WberReport", 4),
            Err(ConfigError::MissingIdentityField { field: "service" })
        );
        assert_eq!(
            ServiceIdentity::new("wber", "WberReport", "", 4),
            Err(ConfigError::MissingIdentityField { field: "filename" })
        );
        assert_eq!(
            ServiceIdentity::new("wber", "WberReport", "WberReport", 0),
            Err(ConfigError::MissingIdentityField { field: "topic_id" })
        );
    }

    #[test]
    fn identity_rejects_path_like_filenames() {
        assert!(matches!(
            ServiceIdentity::new("wber", "WberReport", "../etc/passwd", 4),
            Err(ConfigError::InvalidFilename { .. })
        ));
    }

    #[test]
    fn identity_derives_from_registry() -> Result<(), ConfigError> {
        let identity = ServiceIdentity::for_service(ServiceName::WberReport)?;
        assert_eq!(identity.tag(), "wber");
        assert_eq!(identity.service(), "WberReport");
        assert_eq!(identity.filename(), "WberReport");
        assert_eq!(identity.topic_id(), 4);

        assert_eq!(
            ServiceIdentity::for_service(ServiceName::LamdReport),
            Err(ConfigError::MissingIdentityField { field: "topic_id" })
        );
        Ok(())
    }
}

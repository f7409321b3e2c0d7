//! Path resolution for ServiceTitan's tenant-scoped endpoint layout.

use crate::errors::Error;

/// Inserted when no tenant is known, so the gap shows up in the URL.
pub const TENANT_PLACEHOLDER: &str = "{tenant}";

const TENANT_SEGMENT: &str = "tenant/";

pub fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Resolves `path` against `base_url`.
///
/// Absolute URLs pass through untouched. Relative paths lose their leading
/// slashes and, when a tenant is set, `tenant/` at the start becomes
/// `tenant/<tenant>/`.
pub fn prepare_path(base_url: &str, tenant: Option<&str>, path: &str) -> String {
    if is_absolute(path) {
        return path.to_string();
    }
    let clean = path.trim_start_matches('/');
    let spliced = match tenant.filter(|t| !t.is_empty()) {
        Some(tenant) if clean.starts_with(TENANT_SEGMENT) => {
            format!("{TENANT_SEGMENT}{tenant}/{}", &clean[TENANT_SEGMENT.len()..])
        }
        _ => clean.to_string(),
    };
    format!("{}/{}", base_url.trim_end_matches('/'), spliced)
}

/// Logical pieces of a resource URL:
/// `<folder>/v<version>/tenant/<tenant>/<endpoint>[/<id>[/<modifier>]]`.
#[derive(Clone, Debug)]
pub struct PathParts {
    pub folder: String,
    pub endpoint: String,
    pub version: String,
    pub resource_id: Option<String>,
    pub modifier: Option<String>,
    pub tenant: Option<String>,
}

impl PathParts {
    pub fn new(folder: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            endpoint: endpoint.into(),
            version: "2".to_string(),
            resource_id: None,
            modifier: None,
            tenant: None,
        }
    }

    pub fn version(mut self, version: impl ToString) -> Self {
        self.version = version.to_string();
        self
    }

    pub fn resource_id(mut self, id: impl ToString) -> Self {
        self.resource_id = Some(id.to_string());
        self
    }

    pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = Some(modifier.into());
        self
    }

    pub fn tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    /// Relative path; an explicit tenant wins over `default_tenant`.
    pub fn to_path(&self, default_tenant: Option<&str>) -> Result<String, Error> {
        let folder = self.folder.trim_matches('/');
        if folder.is_empty() {
            return Err(Error::InvalidArgument("folder must not be empty".into()));
        }
        let endpoint = self.endpoint.trim_matches('/');
        if endpoint.is_empty() {
            return Err(Error::InvalidArgument("endpoint must not be empty".into()));
        }

        let tenant = self
            .tenant
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(default_tenant.filter(|t| !t.is_empty()))
            .unwrap_or(TENANT_PLACEHOLDER);
        let version = self.version.to_lowercase();
        let version = if version.starts_with('v') {
            version
        } else {
            format!("v{version}")
        };

        let mut segments = vec![folder, version.as_str(), "tenant", tenant, endpoint];
        if let Some(id) = self.resource_id.as_deref() {
            segments.push(id);
        }
        if let Some(modifier) = self.modifier.as_deref() {
            let modifier = modifier.trim_matches('/');
            if !modifier.is_empty() {
                segments.push(modifier);
            }
        }
        Ok(segments.join("/"))
    }
}

pub fn build_url(
    base_url: &str,
    default_tenant: Option<&str>,
    parts: &PathParts,
) -> Result<String, Error> {
    let path = parts.to_path(default_tenant)?;
    Ok(prepare_path(base_url, default_tenant, &path))
}

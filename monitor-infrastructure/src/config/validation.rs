use anyhow::{anyhow, Result};

pub fn validate_server_url(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("server_url is empty"));
    }
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(anyhow!("server_url must be an http(s) url"));
    }
    Ok(())
}

pub fn validate_snapshot_path(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("snapshot_path is empty"));
    }
    if value.ends_with('/') || value.ends_with('\\') {
        return Err(anyhow!("snapshot_path must name a file"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_url_requires_http_scheme() {
        assert!(validate_server_url("https://relay.example.com/").is_ok());
        assert!(validate_server_url("http://127.0.0.1:8080/").is_ok());
        assert!(validate_server_url("relay.example.com").is_err());
        assert!(validate_server_url("  ").is_err());
    }

    #[test]
    fn snapshot_path_must_be_a_file() {
        assert!(validate_snapshot_path("./alliances.json").is_ok());
        assert!(validate_snapshot_path("./data/").is_err());
        assert!(validate_snapshot_path("").is_err());
    }
}

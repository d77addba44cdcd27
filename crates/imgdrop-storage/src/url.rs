//! Public URL derivation for stored keys.

use imgdrop_core::constants::DEFAULT_S3_REGION;

/// Everything needed to turn a storage key into a public URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUrlConfig {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible providers
    pub endpoint_url: Option<String>,
    /// CDN or proxy base that replaces the store's own addressing.
    pub public_base_url: Option<String>,
}

impl PublicUrlConfig {
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            endpoint_url: None,
            public_base_url: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint_url: Option<String>) -> Self {
        self.endpoint_url = endpoint_url;
        self
    }

    pub fn with_public_base_url(mut self, public_base_url: Option<String>) -> Self {
        self.public_base_url = public_base_url;
        self
    }

    /// Generate public URL for a stored key
    ///
    /// Resolution order:
    /// 1. configured public base URL: `{base}/{key}`
    /// 2. custom endpoint (path-style): `{endpoint}/{bucket}/{key}`
    /// 3. default region: `https://{bucket}.s3.amazonaws.com/{key}`
    /// 4. otherwise: `https://{bucket}.s3.{region}.amazonaws.com/{key}`
    pub fn public_url(&self, key: &str) -> String {
        if let Some(ref base) = self.public_base_url {
            return format!("{}/{}", base.trim_end_matches('/'), key);
        }

        if let Some(ref endpoint) = self.endpoint_url {
            return format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key);
        }

        if self.region == DEFAULT_S3_REGION {
            format!("https://{}.s3.amazonaws.com/{}", self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "users/1/profile/abc.png";

    #[test]
    fn test_default_region_omits_region() {
        let config = PublicUrlConfig::new("avatars", "us-east-1");
        assert_eq!(
            config.public_url(KEY),
            "https://avatars.s3.amazonaws.com/users/1/profile/abc.png"
        );
    }

    #[test]
    fn test_other_region_is_qualified() {
        let config = PublicUrlConfig::new("avatars", "ap-northeast-2");
        assert_eq!(
            config.public_url(KEY),
            "https://avatars.s3.ap-northeast-2.amazonaws.com/users/1/profile/abc.png"
        );
    }

    #[test]
    fn test_public_base_url_override_wins() {
        let config = PublicUrlConfig::new("avatars", "eu-west-1")
            .with_endpoint(Some("http://localhost:9000".to_string()))
            .with_public_base_url(Some("https://cdn.example.com/".to_string()));
        assert_eq!(
            config.public_url(KEY),
            "https://cdn.example.com/users/1/profile/abc.png"
        );
    }

    #[test]
    fn test_custom_endpoint_is_path_style() {
        let config = PublicUrlConfig::new("avatars", "us-east-1")
            .with_endpoint(Some("http://localhost:9000/".to_string()));
        assert_eq!(
            config.public_url(KEY),
            "http://localhost:9000/avatars/users/1/profile/abc.png"
        );
    }

    #[test]
    fn test_public_url_is_deterministic() {
        let config = PublicUrlConfig::new("avatars", "sa-east-1");
        assert_eq!(config.public_url(KEY), config.public_url(KEY));
        assert_eq!(config.clone().public_url(KEY), config.public_url(KEY));
    }
}

//! Site settings singleton.
//!
//! Stored as a single JSONB document keyed `site` and upserted as a whole.
//! Unknown fields are dropped on read; missing fields take their defaults, so
//! older documents keep deserializing as the shape grows.

use serde::{Deserialize, Serialize};

/// Site-wide configuration managed by staff.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Public store name.
    pub store_name: String,
    /// Contact email shown on the site and used for inquiry notifications.
    pub contact_email: Option<String>,
    /// Contact phone number.
    pub contact_phone: Option<String>,
    /// Street address shown on the contact page.
    pub address: Option<String>,
    /// Social profile links.
    pub social: SocialLinks,
    /// Search-engine metadata.
    pub seo: SeoMetadata,
    /// Promotional banner configuration.
    pub promo_banner: PromoBanner,
    /// When set, the storefront answers all non-health requests with a
    /// holding response.
    pub maintenance_mode: bool,
}

/// Social profile links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    /// Instagram profile URL.
    pub instagram: Option<String>,
    /// Facebook page URL.
    pub facebook: Option<String>,
    /// Pinterest profile URL.
    pub pinterest: Option<String>,
    /// TikTok profile URL.
    pub tiktok: Option<String>,
}

/// Search-engine metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoMetadata {
    /// Default page title.
    pub title: Option<String>,
    /// Default meta description.
    pub description: Option<String>,
    /// Default meta keywords.
    pub keywords: Vec<String>,
}

/// Promotional banner configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromoBanner {
    /// Whether the banner is shown.
    pub enabled: bool,
    /// Banner text.
    pub text: Option<String>,
    /// Optional link target.
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let settings: SiteSettings = serde_json::from_str("{}").expect("empty document");
        assert!(!settings.maintenance_mode);
        assert!(!settings.promo_banner.enabled);
        assert!(settings.contact_email.is_none());
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let settings: SiteSettings =
            serde_json::from_str(r#"{"store_name":"Auric","maintenance_mode":true}"#)
                .expect("partial document");
        assert_eq!(settings.store_name, "Auric");
        assert!(settings.maintenance_mode);
        assert!(settings.seo.title.is_none());
    }

    #[test]
    fn test_roundtrip() {
        let mut settings = SiteSettings::default();
        settings.store_name = "Auric Jewelry".to_owned();
        settings.contact_email = Some("hello@auricjewelry.co".to_owned());
        settings.promo_banner.enabled = true;
        settings.promo_banner.text = Some("Free shipping over $200".to_owned());

        let json = serde_json::to_value(&settings).expect("serialize");
        let back: SiteSettings = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back.store_name, "Auric Jewelry");
        assert!(back.promo_banner.enabled);
    }
}

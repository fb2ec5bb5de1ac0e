use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Crumb {
    #[serde(rename = "crumbRequestField")]
    pub crumb_request_field: String,

    pub crumb: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_crumb() {
        let content = r#"{"_class":"hudson.security.csrf.DefaultCrumbIssuer","crumb":"4f1c","crumbRequestField":"Jenkins-Crumb"}"#;
        let crumb: Crumb = serde_json::from_str(content).unwrap();
        assert_eq!(crumb.crumb_request_field, "Jenkins-Crumb");
        assert_eq!(crumb.crumb, "4f1c");
    }
}

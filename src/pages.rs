//! Page assembly.
//!
//! Combines fetched target details with per-target configuration into render
//! contexts, producing the full list of [`Page`] descriptors for a build:
//! one page per target, in config order, followed by the home page
//! aggregating every target.
//!
//! Assembly is all-or-nothing: every fetch must succeed before the writer is
//! handed anything, so a failing fetch leaves the output directory untouched
//! rather than producing a half-built site.
//!
//! ## Target Page Context
//!
//! Each target page gets a `settings` object that the browser-side client
//! (`static/js/asteroid.js`) reads to talk to the TOM directly:
//!
//! ```json
//! {
//!   "settings": {
//!     "base_url": "https://tom.example.org",
//!     "api_url": "/api/target/100/",
//!     "observe_api_url": "/api/observe/",
//!     "facility": "LCO",
//!     "target_pk": 100,
//!     "template_name": "asteroid.html"
//!   }
//! }
//! ```

use serde_json::{Value, json};

use crate::config::Config;
use crate::fetch::{FetchError, TomClient, target_api_path};

/// Facility observation requests are submitted to.
pub const FACILITY: &str = "LCO";

/// API path for submitting observation requests, relative to the base URL.
pub const OBSERVE_API_URL: &str = "/api/observe/";

/// Template used for the home page. Target pages name their template in the
/// config; the home page template is fixed.
pub const HOME_TEMPLATE: &str = "home.html";

/// A renderable page: template name plus context.
///
/// `name` is the output directory under the site root; the home page has an
/// empty name and is written directly to the root. Ephemeral — consumed by
/// the site writer and discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub name: String,
    pub template: String,
    pub context: Value,
}

/// Assemble the page list for a build.
///
/// Walks `config.targets` in order, fetching details for each; returns
/// exactly `N + 1` pages with the home page last. Any fetch failure aborts
/// assembly.
pub fn assemble(config: &Config, client: &TomClient) -> Result<Vec<Page>, FetchError> {
    let mut pages = Vec::with_capacity(config.targets.len() + 1);
    let mut home_entries = Vec::with_capacity(config.targets.len());

    for target in &config.targets {
        let details = client.fetch_target(config.base_url(), target.pk)?;
        let identifier = details.target.identifier;

        pages.push(Page {
            name: identifier.clone(),
            template: target.template_name.clone(),
            context: json!({
                "settings": {
                    "base_url": config.base_url(),
                    "api_url": target_api_path(target.pk),
                    "observe_api_url": OBSERVE_API_URL,
                    "facility": FACILITY,
                    "target_pk": target.pk,
                    "template_name": target.template_name,
                }
            }),
        });

        home_entries.push(json!({
            "url": format!("/{identifier}"),
            "name": details.target.name,
            "image_name": target.preview_image_output_name(),
            "teaser": target.teaser,
            "active": details.target.extra_fields.active,
        }));
    }

    pages.push(Page {
        name: String::new(),
        template: HOME_TEMPLATE.to_string(),
        context: json!({ "targets": home_entries }),
    });

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Target;
    use std::path::PathBuf;

    fn test_config(base_url: &str, targets: Vec<Target>) -> Config {
        Config {
            tom_education_url: base_url.to_string(),
            targets,
        }
    }

    fn test_target(pk: u32, preview: &str, teaser: &str) -> Target {
        Target {
            pk,
            template_name: "t".to_string(),
            preview_image: PathBuf::from(preview),
            teaser: teaser.to_string(),
        }
    }

    fn mock_details(server: &mut mockito::Server, pk: u32, identifier: &str) -> mockito::Mock {
        server
            .mock("GET", format!("/api/target/{pk}/").as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"target": {{"identifier": "{identifier}", "name": "Cool target",
                     "extra_fields": {{"active": false}}}}}}"#
            ))
            .create()
    }

    #[test]
    fn empty_target_list_yields_only_home_page() {
        let config = test_config("someurl", vec![]);
        let client = TomClient::new().unwrap();

        let pages = assemble(&config, &client).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].name, "");
        assert_eq!(pages[0].template, HOME_TEMPLATE);
        assert_eq!(pages[0].context, json!({ "targets": [] }));
    }

    #[test]
    fn target_pages_in_config_order_with_home_last() {
        let mut server = mockito::Server::new();
        mock_details(&mut server, 100, "target_1");
        mock_details(&mut server, 101, "target_2");

        let config = test_config(
            &server.url(),
            vec![
                test_target(100, "img.png", "hello"),
                test_target(101, "img.png", ""),
            ],
        );
        let client = TomClient::new().unwrap();

        let pages = assemble(&config, &client).unwrap();

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].name, "target_1");
        assert_eq!(pages[1].name, "target_2");
        assert_eq!(pages[2].name, "");

        // Target pages share the configured template; the home page does not.
        assert_eq!(pages[0].template, pages[1].template);
        assert_ne!(pages[0].template, pages[2].template);
    }

    #[test]
    fn settings_context_has_expected_shape() {
        let mut server = mockito::Server::new();
        mock_details(&mut server, 100, "target_1");

        let config = test_config(&server.url(), vec![test_target(100, "img.png", "")]);
        let client = TomClient::new().unwrap();

        let pages = assemble(&config, &client).unwrap();
        let settings = &pages[0].context["settings"];

        // serde_json maps iterate in sorted key order.
        let keys: Vec<&String> = settings.as_object().unwrap().keys().collect();
        assert_eq!(
            keys,
            [
                "api_url",
                "base_url",
                "facility",
                "observe_api_url",
                "target_pk",
                "template_name"
            ]
        );
        assert!(settings["api_url"].as_str().unwrap().ends_with("/100/"));
        assert_eq!(settings["base_url"], json!(server.url()));
        assert_eq!(settings["facility"], json!(FACILITY));
        assert_eq!(settings["target_pk"], json!(100));
    }

    #[test]
    fn home_context_aggregates_all_targets() {
        let mut server = mockito::Server::new();
        mock_details(&mut server, 100, "target_1");
        mock_details(&mut server, 101, "target_2");

        let config = test_config(
            &server.url(),
            vec![
                test_target(100, "img.png", "hello"),
                test_target(101, "img.png", ""),
            ],
        );
        let client = TomClient::new().unwrap();

        let pages = assemble(&config, &client).unwrap();
        let home = pages.last().unwrap();

        assert_eq!(
            home.context,
            json!({
                "targets": [
                    {
                        "url": "/target_1",
                        "name": "Cool target",
                        "image_name": "100.png",
                        "teaser": "hello",
                        "active": false,
                    },
                    {
                        "url": "/target_2",
                        "name": "Cool target",
                        "image_name": "101.png",
                        "teaser": "",
                        "active": false,
                    },
                ]
            })
        );
    }

    #[test]
    fn fetch_failure_aborts_assembly() {
        let config = test_config("http://127.0.0.1:1", vec![test_target(42, "img.png", "")]);
        let client = TomClient::new().unwrap();

        let err = assemble(&config, &client).unwrap_err();
        assert!(matches!(err, FetchError::Connection { .. }));
        assert!(err.to_string().contains("http://127.0.0.1:1"));
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

/// Options passed to the drawer once per page, before any instance is built.
///
/// Keys are camel-cased on the wire:
///
/// ```
/// use help_drawer::HelpConfig;
///
/// let config = HelpConfig::from_json(r#"{
///     "apiUrl": "https://api.example.com",
///     "apiOrgId": "org",
///     "apiDeployId": "deploy",
///     "apiToken": "token",
///     "portalUrl": "https://help.example.com",
///     "otherUrls": [{ "text": "Status", "href": "https://status.example.com", "target": "_blank" }]
/// }"#).unwrap();
///
/// assert_eq!(config.other_urls[0].text, "Status");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpConfig {
    pub api_url: String,
    pub api_org_id: String,
    pub api_deploy_id: String,
    pub api_token: String,
    pub portal_url: String,
    #[serde(default)]
    pub other_urls: Vec<OtherUrl>,
    /// Drawer stylesheet, loaded into the shadow root
    #[serde(default = "default_styles_url")]
    pub styles_url: String,
    /// Svg sprite sheet used by `u-icon`
    #[serde(default = "default_sprites_url")]
    pub sprites_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OtherUrl {
    pub text: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

fn default_styles_url() -> String {
    "assets/styles/heretto-help.css".into()
}

fn default_sprites_url() -> String {
    "assets/images/icons.svg".into()
}

impl Default for HelpConfig {
    fn default() -> Self {
        HelpConfig {
            api_url: String::new(),
            api_org_id: String::new(),
            api_deploy_id: String::new(),
            api_token: String::new(),
            portal_url: String::new(),
            other_urls: Vec::new(),
            styles_url: default_styles_url(),
            sprites_url: default_sprites_url(),
        }
    }
}

impl HelpConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

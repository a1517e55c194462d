//! Popup window arguments. The front-end opens the window; this module only
//! decides its name and `window.open` feature string.

use serde::{Deserialize, Serialize};

/// Full popup settings. Defaults match a medium-sized, centered, resizable
/// window without toolbar or menubar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PopOptions {
    pub window_name: String,
    pub toolbar: String,
    pub menubar: String,
    pub resizable: String,
    pub scrollbars: String,
    pub width: u32,
    pub height: u32,
    pub center: bool,
}

impl Default for PopOptions {
    fn default() -> Self {
        Self {
            window_name: "popWindow".into(),
            toolbar: "no".into(),
            menubar: "no".into(),
            resizable: "yes".into(),
            scrollbars: "yes".into(),
            width: 790,
            height: 600,
            center: true,
        }
    }
}

/// Caller overrides; unset fields fall back to the defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopOverrides {
    pub window_name: Option<String>,
    pub toolbar: Option<String>,
    pub menubar: Option<String>,
    pub resizable: Option<String>,
    pub scrollbars: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub center: Option<bool>,
}

impl PopOptions {
    pub fn merged(&self, o: &PopOverrides) -> PopOptions {
        PopOptions {
            window_name: o.window_name.clone().unwrap_or_else(|| self.window_name.clone()),
            toolbar: o.toolbar.clone().unwrap_or_else(|| self.toolbar.clone()),
            menubar: o.menubar.clone().unwrap_or_else(|| self.menubar.clone()),
            resizable: o.resizable.clone().unwrap_or_else(|| self.resizable.clone()),
            scrollbars: o.scrollbars.clone().unwrap_or_else(|| self.scrollbars.clone()),
            width: o.width.unwrap_or(self.width),
            height: o.height.unwrap_or(self.height),
            center: o.center.unwrap_or(self.center),
        }
    }
}

/// Screen the popup is centered on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Screen {
    pub width: u32,
    pub height: u32,
}

impl Default for Screen {
    fn default() -> Self {
        Self { width: 1920, height: 1080 }
    }
}

/// Arguments for `window.open(url, name, features)`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PopupSpec {
    pub url: String,
    pub name: String,
    pub features: String,
}

/// Build the popup arguments for `url`. `None` when the URL is empty.
pub fn pop(url: &str, defaults: &PopOptions, overrides: Option<&PopOverrides>, screen: Screen) -> Option<PopupSpec> {
    if url.is_empty() {
        return None;
    }
    let s = match overrides {
        Some(o) => defaults.merged(o),
        None => defaults.clone(),
    };

    let mut features = format!(
        "toolbar={},menubar={},resizable={},scrollbars={},width={},height={}",
        s.toolbar, s.menubar, s.resizable, s.scrollbars, s.width, s.height
    );
    if s.center {
        let left = (f64::from(screen.width) - f64::from(s.width)) / 2.0;
        let top = (f64::from(screen.height) - f64::from(s.height)) / 2.0;
        features.push_str(&format!(",top={},left={}", top, left));
    }

    Some(PopupSpec { url: url.to_string(), name: s.window_name, features })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_centered() {
        let spec = pop("https://example.com", &PopOptions::default(), None, Screen::default()).unwrap();
        assert_eq!(spec.name, "popWindow");
        assert_eq!(
            spec.features,
            "toolbar=no,menubar=no,resizable=yes,scrollbars=yes,width=790,height=600,top=240,left=565"
        );
    }

    #[test]
    fn test_overrides_win() {
        let o = PopOverrides {
            window_name: Some("help".into()),
            toolbar: Some("yes".into()),
            width: Some(400),
            center: Some(false),
            ..PopOverrides::default()
        };
        let spec = pop("/help", &PopOptions::default(), Some(&o), Screen::default()).unwrap();
        assert_eq!(spec.name, "help");
        assert_eq!(spec.features, "toolbar=yes,menubar=no,resizable=yes,scrollbars=yes,width=400,height=600");
    }

    #[test]
    fn test_odd_screen_and_oversized_window() {
        let o = PopOverrides { width: Some(801), height: Some(900), ..PopOverrides::default() };
        let spec = pop("/x", &PopOptions::default(), Some(&o), Screen { width: 1366, height: 768 }).unwrap();
        assert!(spec.features.ends_with(",top=-66,left=282.5"));
    }

    #[test]
    fn test_empty_url() {
        assert_eq!(pop("", &PopOptions::default(), None, Screen::default()), None);
    }

    #[test]
    fn test_overrides_from_json() {
        let o: PopOverrides = serde_json::from_str(r#"{"windowName":"w","height":300}"#).unwrap();
        let s = PopOptions::default().merged(&o);
        assert_eq!(s.window_name, "w");
        assert_eq!(s.height, 300);
        assert_eq!(s.width, 790);
    }
}

//! Declarative configuration for the bundled Swiper widget.
//!
//! The server builds the whole configuration object and injects it into the
//! page as a JSON island; the client script does nothing but hand it to the
//! widget constructor.

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::entities::ShowcaseSettingsRecord;

/// Settings the carousel derives from the stored showcase configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarouselSettings {
    pub autoplay_enabled: bool,
    pub autoplay_delay: u32,
}

impl From<&ShowcaseSettingsRecord> for CarouselSettings {
    fn from(record: &ShowcaseSettingsRecord) -> Self {
        Self {
            autoplay_enabled: record.autoplay_enabled,
            autoplay_delay: record.autoplay_delay_ms.max(0) as u32,
        }
    }
}

/// The full widget configuration. The autoplay stanza is attached only when
/// enabled; a disabled carousel must not carry it at all.
pub fn widget_config(settings: CarouselSettings) -> Value {
    let mut config = json!({
        "direction": "horizontal",
        "loop": true,
        "slidesPerView": 1,
        "spaceBetween": 10,
        "pagination": {
            "el": ".swiper-pagination",
            "clickable": true,
        },
        "navigation": {
            "nextEl": ".swiper-button-next",
            "prevEl": ".swiper-button-prev",
        },
    });

    if settings.autoplay_enabled {
        config["autoplay"] = json!({
            "delay": settings.autoplay_delay,
            "disableOnInteraction": false,
        });
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShowcaseSettingsRecord;

    #[test]
    fn default_settings_autoplay_at_5000() {
        let record = ShowcaseSettingsRecord::default();
        let config = widget_config(CarouselSettings::from(&record));
        assert_eq!(config["autoplay"]["delay"], 5000);
        assert_eq!(config["autoplay"]["disableOnInteraction"], false);
        assert_eq!(config["slidesPerView"], 1);
        assert_eq!(config["loop"], true);
    }

    #[test]
    fn disabled_autoplay_omits_the_stanza_entirely() {
        let record = ShowcaseSettingsRecord {
            autoplay_enabled: false,
            ..ShowcaseSettingsRecord::default()
        };
        let config = widget_config(CarouselSettings::from(&record));
        assert!(config.get("autoplay").is_none());
    }

    #[test]
    fn configured_delay_is_carried_through() {
        let record = ShowcaseSettingsRecord {
            autoplay_delay_ms: 2500,
            ..ShowcaseSettingsRecord::default()
        };
        let settings = CarouselSettings::from(&record);
        assert_eq!(settings.autoplay_delay, 2500);
        let config = widget_config(settings);
        assert_eq!(config["autoplay"]["delay"], 2500);
    }
}

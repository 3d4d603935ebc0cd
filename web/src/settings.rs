use crate::game::GameProps;
use crate::utils::*;
use lifesweeper_core::GridConfig;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Settings {
    pub grid: GridConfig,
    pub step_interval_ms: u32,
}

impl Settings {
    pub const DEFAULT_STEP_INTERVAL_MS: u32 = 5000;

    /// Defaults, overridden by whatever came in through the location hash.
    pub fn from_props(props: &GameProps) -> Self {
        let defaults = Self::default();
        let width = props.width.unwrap_or(defaults.grid.size.0);
        let height = props.height.unwrap_or(defaults.grid.size.1);
        let mine_probability = props
            .mine_probability
            .unwrap_or(defaults.grid.mine_probability);
        let step_interval_ms = props
            .step_interval
            .unwrap_or(defaults.step_interval_ms)
            .max(1);

        Self {
            grid: GridConfig::new((width, height), mine_probability),
            step_interval_ms,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            step_interval_ms: Self::DEFAULT_STEP_INTERVAL_MS,
        }
    }
}

/// Whether the how-to-play dialog stays closed on start.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct HelpPreference {
    pub suppressed: bool,
}

impl StorageKey for HelpPreference {
    const KEY: &'static str = "lifesweeper:disableHowToPlay";
}

impl HelpPreference {
    /// Stores the flag when set, removes it otherwise.
    pub fn apply(suppressed: bool) -> Self {
        let preference = Self { suppressed };
        if suppressed {
            preference.local_save();
        } else {
            Self::local_clear();
        }
        preference
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn help_preference_persists_until_cleared() {
        HelpPreference::apply(true);
        assert!(HelpPreference::local_or_default().suppressed);

        HelpPreference::apply(false);
        assert!(!HelpPreference::local_or_default().suppressed);
    }
}

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Editor colour theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Theme {
    Monokai,
    Github,
    Tomorrow,
    Kuroir,
    Twilight,
    Xcode,
    Textmate,
    #[default]
    SolarizedDark,
    SolarizedLight,
    Terminal,
}

impl Theme {
    pub const ALL: [Theme; 10] = [
        Theme::Monokai,
        Theme::Github,
        Theme::Tomorrow,
        Theme::Kuroir,
        Theme::Twilight,
        Theme::Xcode,
        Theme::Textmate,
        Theme::SolarizedDark,
        Theme::SolarizedLight,
        Theme::Terminal,
    ];

    /// Identifier used in config files and commands
    pub fn name(self) -> &'static str {
        match self {
            Theme::Monokai => "monokai",
            Theme::Github => "github",
            Theme::Tomorrow => "tomorrow",
            Theme::Kuroir => "kuroir",
            Theme::Twilight => "twilight",
            Theme::Xcode => "xcode",
            Theme::Textmate => "textmate",
            Theme::SolarizedDark => "solarized_dark",
            Theme::SolarizedLight => "solarized_light",
            Theme::Terminal => "terminal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Monokai => "Monokai",
            Theme::Github => "GitHub",
            Theme::Tomorrow => "Tomorrow",
            Theme::Kuroir => "Kuroir",
            Theme::Twilight => "Twilight",
            Theme::Xcode => "Xcode",
            Theme::Textmate => "Textmate",
            Theme::SolarizedDark => "Solarized Dark",
            Theme::SolarizedLight => "Solarized Light",
            Theme::Terminal => "Terminal",
        }
    }

    /// Closest theme bundled with syntect
    pub fn syntect_theme(self) -> &'static str {
        match self {
            Theme::Github | Theme::Xcode | Theme::Kuroir => "InspiredGitHub",
            Theme::Tomorrow | Theme::Textmate => "base16-ocean.light",
            Theme::Monokai => "base16-mocha.dark",
            Theme::Twilight => "base16-eighties.dark",
            Theme::SolarizedDark => "Solarized (dark)",
            Theme::SolarizedLight => "Solarized (light)",
            Theme::Terminal => "base16-ocean.dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Theme::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Theme::ALL.iter().map(|t| t.name()).collect();
                format!("unknown theme '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

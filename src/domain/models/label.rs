//! Label taxonomy.
//!
//! The taxonomy is static configuration applied to every imported issue. It
//! is not derived from the input document.

use serde::{Deserialize, Serialize};

/// A label the tracker must carry before issues are created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelSpec {
    pub name: String,
    /// Six hex digits, no leading `#`.
    pub color: String,
    pub description: String,
}

impl LabelSpec {
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            description: description.into(),
        }
    }

    /// Returns `true` if `color` is exactly six hexadecimal digits.
    pub fn has_valid_color(&self) -> bool {
        self.color.len() == 6 && self.color.chars().all(|c| c.is_ascii_hexdigit())
    }
}

/// Grouping used when printing the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelCategory {
    Priority,
    Component,
    Architecture,
    Phase,
    Type,
    Area,
}

impl std::fmt::Display for LabelCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Priority => "priority",
            Self::Component => "component",
            Self::Architecture => "architecture",
            Self::Phase => "phase",
            Self::Type => "type",
            Self::Area => "area",
        };
        f.write_str(name)
    }
}

const TAXONOMY: &[(LabelCategory, &str, &str, &str)] = &[
    (LabelCategory::Priority, "priority-critical", "d73a4a", "Critical priority - must have"),
    (LabelCategory::Priority, "priority-high", "ff9800", "High priority - should have"),
    (LabelCategory::Priority, "priority-medium", "ffc107", "Medium priority - nice to have"),
    (LabelCategory::Priority, "priority-low", "8bc34a", "Low priority - future work"),
    (LabelCategory::Component, "microkernel", "0052cc", "Microkernel code"),
    (LabelCategory::Component, "uk-space", "0066ff", "µK-Space (memory management)"),
    (LabelCategory::Component, "uk-time", "3399ff", "µK-Time (scheduler)"),
    (LabelCategory::Component, "uk-ipc", "66ccff", "µK-IPC (communication)"),
    (LabelCategory::Component, "userland", "00bcd4", "User-space programs"),
    (LabelCategory::Component, "server", "26c6da", "System servers"),
    (LabelCategory::Component, "driver", "4dd0e1", "Device drivers"),
    (LabelCategory::Component, "infrastructure", "546e7a", "Build/CI/tooling"),
    (LabelCategory::Component, "documentation", "9e9e9e", "Documentation"),
    (LabelCategory::Component, "testing", "795548", "Tests and QA"),
    (LabelCategory::Component, "security", "d32f2f", "Security-related"),
    (LabelCategory::Component, "library", "7b1fa2", "Library code"),
    (LabelCategory::Architecture, "x86_64", "673ab7", "x86-64 specific"),
    (LabelCategory::Architecture, "aarch64", "512da8", "ARM64 specific"),
    (LabelCategory::Architecture, "architecture", "9c27b0", "Multi-architecture"),
    (LabelCategory::Architecture, "riscv", "8e24aa", "RISC-V specific"),
    (LabelCategory::Phase, "phase-1", "1b5e20", "Foundation (weeks 1-16)"),
    (LabelCategory::Phase, "phase-2", "2e7d32", "Core features (weeks 17-28)"),
    (LabelCategory::Phase, "phase-3", "43a047", "Production ready (weeks 29-48)"),
    (LabelCategory::Phase, "phase-4", "66bb6a", "Advanced features (2027+)"),
    (LabelCategory::Type, "enhancement", "84b7c2", "New feature"),
    (LabelCategory::Type, "bug", "d73a4a", "Bug report"),
    (LabelCategory::Type, "design", "c5def5", "Design discussion"),
    (LabelCategory::Type, "research", "b39ddb", "Research task"),
    (LabelCategory::Area, "boot", "ff6f00", "Boot and initialization"),
    (LabelCategory::Area, "api", "ff9100", "API design"),
    (LabelCategory::Area, "network", "00acc1", "Networking"),
    (LabelCategory::Area, "filesystem", "8d6e63", "File systems"),
    (LabelCategory::Area, "graphics", "e91e63", "Graphics and GPU"),
    (LabelCategory::Area, "power", "fdd835", "Power management"),
    (LabelCategory::Area, "real-time", "c62828", "Real-time features"),
    (LabelCategory::Area, "container", "5e35b1", "Container support"),
    (LabelCategory::Area, "tooling", "616161", "Developer tools"),
    (LabelCategory::Area, "platform", "6d4c41", "Platform support"),
];

/// Built-in taxonomy in declaration order, with categories.
pub fn builtin_taxonomy_by_category() -> Vec<(LabelCategory, LabelSpec)> {
    TAXONOMY
        .iter()
        .map(|(category, name, color, description)| {
            (*category, LabelSpec::new(*name, *color, *description))
        })
        .collect()
}

/// Built-in taxonomy in declaration order.
pub fn builtin_taxonomy() -> Vec<LabelSpec> {
    builtin_taxonomy_by_category()
        .into_iter()
        .map(|(_, label)| label)
        .collect()
}

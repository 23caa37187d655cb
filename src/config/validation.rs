//! Config validation: unknown-key detection with Levenshtein suggestions
//! and range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::defaults::{FENCE_EXTENSION_WARN_M, FENCE_SAMPLING_WARN_M};
use super::ViewerConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `ViewerConfig`.
///
/// Kept in step with the section structs in `viewer_config.rs`.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [model]
        "model",
        "model.basedir",
        // [fence]
        "fence",
        "fence.extension",
        "fence.sampling_interval",
        // [zonation]
        "zonation",
        "zonation.min_zone_code",
        // [display]
        "display",
        "display.zunit",
        "display.colors",
        // [server]
        "server",
        "server.addr",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties go to the alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys; it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    // parse errors are reported by serde afterwards
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Validate value ranges on a parsed `ViewerConfig`.
///
/// Returns (errors, warnings). Errors are values the viewer cannot work
/// with; warnings are suspicious but usable.
pub fn validate_physical_ranges(config: &ViewerConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let fence = &config.fence;

    // NaN comparisons are always false, so check finiteness first
    if !fence.sampling_interval.is_finite() || fence.sampling_interval <= 0.0 {
        errors.push(format!(
            "fence.sampling_interval = {} must be a positive number",
            fence.sampling_interval
        ));
    } else if fence.sampling_interval > FENCE_SAMPLING_WARN_M {
        warnings.push(ValidationWarning {
            field: "fence.sampling_interval".to_string(),
            message: format!(
                "fence.sampling_interval = {:.1} m is coarser than {FENCE_SAMPLING_WARN_M} m",
                fence.sampling_interval
            ),
            suggestion: None,
        });
    }

    if !fence.extension.is_finite() || fence.extension < 0.0 {
        errors.push(format!(
            "fence.extension = {} must be a non-negative number",
            fence.extension
        ));
    } else if fence.extension > FENCE_EXTENSION_WARN_M {
        warnings.push(ValidationWarning {
            field: "fence.extension".to_string(),
            message: format!(
                "fence.extension = {:.0} m is unusually large (> {FENCE_EXTENSION_WARN_M} m)",
                fence.extension
            ),
            suggestion: None,
        });
    }

    if config.display.colors.is_empty() {
        errors.push("display.colors must contain at least one color".to_string());
    }
    if let Some(i) = config.display.colors.iter().position(|c| c.trim().is_empty()) {
        errors.push(format!("display.colors[{i}] is empty"));
    }

    if config.display.zunit.trim().is_empty() {
        warnings.push(ValidationWarning {
            field: "display.zunit".to_string(),
            message: "display.zunit is empty; the depth axis will have no label".to_string(),
            suggestion: None,
        });
    }

    if config.server.addr.parse::<std::net::SocketAddr>().is_err() {
        errors.push(format!(
            "server.addr = '{}' is not a valid socket address",
            config.server.addr
        ));
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

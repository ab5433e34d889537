use std::{
    fs, io,
    path::{Path, PathBuf},
};

use bray_kinetics::Scenario;
use thiserror::Error;

/// A scenario file could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read scenario {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid scenario {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Reads a TOML scenario from `path`.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be read or is not a valid
/// scenario. Option values are not validated here.
pub fn load(path: &Path) -> Result<Scenario, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use bray_kinetics::Method;

    /// Writes `text` to a file unique to this test and returns its path.
    fn scenario_file(name: &str, text: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("bray-{}-{name}.toml", std::process::id()));
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn loads_a_partial_scenario() {
        let path = scenario_file(
            "partial",
            r#"
            [initial]
            w = 4.0

            [simulation]
            method = "RK23"
            n_points = 11
            "#,
        );

        let scenario = load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(scenario.initial.w, 4.0);
        assert_eq!(scenario.initial.u, Scenario::default().initial.u);
        assert_eq!(scenario.simulation.method, Method::Rk23);
        assert_eq!(scenario.simulation.n_points, 11);
        assert_eq!(scenario.rates, Scenario::default().rates);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let path = std::env::temp_dir().join("bray-no-such-scenario.toml");

        let err = load(&path).unwrap_err();

        assert!(matches!(err, LoadError::Read { .. }));
        assert!(err.to_string().contains("bray-no-such-scenario.toml"));
    }

    #[test]
    fn unknown_method_is_a_parse_error() {
        let path = scenario_file("bad-method", "[simulation]\nmethod = \"RK99\"\n");

        let err = load(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("RK99"));
    }
}

use rand::Rng;

use crate::error::ConfigError;
use crate::graph::VERTEX_UNIVERSE;

/// Inclusive bounds on the order of a randomly generated graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct VertexRange {
    pub min: usize,
    pub max: usize,
}

impl VertexRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Pick a vertex count uniformly from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(self.min..=self.max)
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                field,
                min: self.min as i64,
                max: self.max as i64,
            });
        }
        if self.min == 0 {
            return Err(ConfigError::TooSmall {
                field,
                min: 1,
                value: self.min,
            });
        }
        if self.max > VERTEX_UNIVERSE {
            return Err(ConfigError::TooLarge {
                field,
                max: VERTEX_UNIVERSE,
                value: self.max,
            });
        }
        Ok(())
    }
}

/// Sizes and value ranges used when an algorithm is built from random input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct InputConfig {
    /// Length of generated arrays.
    pub array_len: usize,
    pub min_value: i32,
    pub max_value: i32,
    pub bfs_vertices: VertexRange,
    pub dfs_vertices: VertexRange,
    /// Graph order for Prim and Kruskal.
    pub mst_vertices: VertexRange,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            array_len: 9,
            min_value: -99,
            max_value: 99,
            bfs_vertices: VertexRange::new(5, 9),
            dfs_vertices: VertexRange::new(7, 9),
            mst_vertices: VertexRange::new(7, 9),
        }
    }
}

impl InputConfig {
    /// Check that every range can actually be sampled.
    ///
    /// Sort inputs hold distinct values, so the value range must be at
    /// least as wide as the array.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_value > self.max_value {
            return Err(ConfigError::InvertedRange {
                field: "value",
                min: self.min_value as i64,
                max: self.max_value as i64,
            });
        }
        if self.array_len == 0 {
            return Err(ConfigError::TooSmall {
                field: "array_len",
                min: 1,
                value: 0,
            });
        }
        let distinct = (self.max_value as i64 - self.min_value as i64 + 1) as usize;
        if self.array_len > distinct {
            return Err(ConfigError::TooLarge {
                field: "array_len",
                max: distinct,
                value: self.array_len,
            });
        }
        self.bfs_vertices.validate("bfs_vertices")?;
        self.dfs_vertices.validate("dfs_vertices")?;
        self.mst_vertices.validate("mst_vertices")?;
        Ok(())
    }

    /// Parse and validate a TOML config. Missing fields take their defaults.
    #[cfg(feature = "serde")]
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: InputConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(InputConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_vertex_range_is_rejected() {
        let config = InputConfig {
            dfs_vertices: VertexRange::new(9, 7),
            ..InputConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedRange {
                field: "dfs_vertices",
                min: 9,
                max: 7
            })
        );
    }

    #[test]
    fn vertex_range_above_universe_is_rejected() {
        let config = InputConfig {
            mst_vertices: VertexRange::new(7, 13),
            ..InputConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooLarge { field: "mst_vertices", .. })
        ));
    }

    #[test]
    fn array_wider_than_value_range_is_rejected() {
        let config = InputConfig {
            array_len: 4,
            min_value: 0,
            max_value: 2,
            ..InputConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooLarge { field: "array_len", max: 3, value: 4 })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn from_toml_fills_defaults() {
        let config = InputConfig::from_toml(
            r#"
            array_len = 5

            [bfs_vertices]
            min = 3
            max = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.array_len, 5);
        assert_eq!(config.bfs_vertices, VertexRange::new(3, 4));
        assert_eq!(config.mst_vertices, InputConfig::default().mst_vertices);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn from_toml_reports_parse_errors() {
        assert!(matches!(
            InputConfig::from_toml("array_len = \"nine\""),
            Err(ConfigError::Parse(_))
        ));
    }
}

// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Layer configuration loaded from TOML or JSON, or constructed
//! programmatically.
//!
//! # TOML Format
//! ```toml
//! type = "max_pooling"
//! kernel_h = 3
//! kernel_w = 3
//! stride_h = 3
//! stride_w = 3
//! ```
//!
//! ```toml
//! type = "linear"
//! in_features = 2
//! out_features = 1
//! use_bias = true
//! weights = [1.0, 1.0]
//! bias = [10.0]
//! ```

use std::path::Path;

use crate::{
    ExpressionLayer, HardSwishLayer, Layer, LayerError, LinearLayer, MaxPoolingLayer,
    SigmoidLayer, SiluLayer, ViewLayer,
};

/// Serialisable description of one layer, tagged by `type`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerConfig {
    Sigmoid,
    HardSwish,
    Silu,
    Linear {
        in_features: usize,
        out_features: usize,
        /// Defaults to whether `bias` is given.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        use_bias: Option<bool>,
        /// `out_features × in_features`, row-major. Left unset, the layer
        /// rejects every `forward` until weights are installed.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weights: Option<Vec<f32>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bias: Option<Vec<f32>>,
    },
    MaxPooling {
        #[serde(default)]
        pad_h: usize,
        #[serde(default)]
        pad_w: usize,
        kernel_h: usize,
        kernel_w: usize,
        stride_h: usize,
        stride_w: usize,
    },
    View {
        /// Target dimensions; `-1` is inferred from the element count.
        shape: Vec<i64>,
    },
    Expression {
        expr: String,
    },
}

impl LayerConfig {
    /// Loads a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, LayerError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LayerError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, LayerError> {
        toml::from_str(toml_str)
            .map_err(|e| LayerError::Config(format!("TOML parse error: {e}")))
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LayerError> {
        serde_json::from_str(json)
            .map_err(|e| LayerError::Config(format!("JSON parse error: {e}")))
    }

    /// Serialises the configuration to TOML.
    pub fn to_toml(&self) -> Result<String, LayerError> {
        toml::to_string_pretty(self)
            .map_err(|e| LayerError::Config(format!("TOML serialise error: {e}")))
    }

    /// The `type` tag of this configuration.
    pub fn kind(&self) -> &'static str {
        match self {
            LayerConfig::Sigmoid => "sigmoid",
            LayerConfig::HardSwish => "hard_swish",
            LayerConfig::Silu => "silu",
            LayerConfig::Linear { .. } => "linear",
            LayerConfig::MaxPooling { .. } => "max_pooling",
            LayerConfig::View { .. } => "view",
            LayerConfig::Expression { .. } => "expression",
        }
    }

    /// Creates the layer described by this configuration.
    ///
    /// # Errors
    /// [`LayerError::Syntax`] for an unparsable expression;
    /// [`LayerError::WeightSize`] / [`LayerError::BiasSize`] for
    /// wrongly sized Linear parameters; [`LayerError::InvalidConfig`] for a
    /// bias given while `use_bias` is off, or weights given without the bias
    /// `use_bias` asks for.
    pub fn build(&self) -> Result<Box<dyn Layer>, LayerError> {
        tracing::debug!(kind = self.kind(), "building layer from config");
        let layer: Box<dyn Layer> = match self {
            LayerConfig::Sigmoid => Box::new(SigmoidLayer::new()),
            LayerConfig::HardSwish => Box::new(HardSwishLayer::new()),
            LayerConfig::Silu => Box::new(SiluLayer::new()),
            LayerConfig::Linear {
                in_features,
                out_features,
                use_bias,
                weights,
                bias,
            } => {
                let use_bias = use_bias.unwrap_or(bias.is_some());
                if use_bias && weights.is_some() && bias.is_none() {
                    return Err(LayerError::InvalidConfig {
                        layer: "linear",
                        detail: "use_bias is set but no bias is given".into(),
                    });
                }
                let mut layer = LinearLayer::new(*in_features, *out_features, use_bias);
                if let Some(weights) = weights {
                    layer.set_weights(weights.clone())?;
                }
                if let Some(bias) = bias {
                    layer.set_bias(bias.clone())?;
                }
                Box::new(layer)
            }
            LayerConfig::MaxPooling {
                pad_h,
                pad_w,
                kernel_h,
                kernel_w,
                stride_h,
                stride_w,
            } => Box::new(MaxPoolingLayer::new(
                *pad_h, *pad_w, *kernel_h, *kernel_w, *stride_h, *stride_w,
            )),
            LayerConfig::View { shape } => Box::new(ViewLayer::new(shape.clone())),
            LayerConfig::Expression { expr } => Box::new(ExpressionLayer::new(expr)?),
        };
        Ok(layer)
    }
}

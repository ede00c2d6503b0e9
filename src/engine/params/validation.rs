/// Validation of user input and stored settings against the parameter registry.
///
/// `ValidationError`s are recoverable: the editor prints them and asks again,
/// the batch driver logs them as warnings. `SchemaError`s describe a broken
/// profile table and are fatal at startup.
use thiserror::Error;

use super::types::{
    CONTAINER_KEY, ChoiceDef, CodecProfile, Context, Handler, PASSES_KEY, ParamKind, PassStyle,
    Range,
};
use crate::engine::core::{SettingValue, Settings};

/// Bad value for a single parameter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{value} is out of range ({range})")]
    OutOfRange { value: String, range: String },

    #[error("'{value}' is not one of: {allowed}")]
    NotAllowed { value: String, allowed: String },

    #[error("'{input}' is not a valid choice, enter 1-{count}")]
    InvalidChoice { input: String, count: usize },

    #[error("'{0}' is not a valid dimension, expected a positive integer")]
    InvalidDimension(String),

    #[error("'{0}' is not a valid resolution, expected W:H (use -1 on one side to keep aspect ratio)")]
    InvalidResolution(String),

    #[error("setting '{key}': {reason}")]
    Setting {
        key: String,
        reason: Box<ValidationError>,
    },
}

/// Broken profile table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Duplicate profile name '{0}'")]
    DuplicateProfile(String),

    #[error("Profile '{profile}' declares parameter '{key}' twice")]
    DuplicateParameter { profile: String, key: String },

    #[error("Profile '{profile}' has no '{key}' meta parameter")]
    MissingMeta { profile: String, key: String },

    #[error("Profile '{profile}' uses quality key '{key}' which is not a parameter")]
    UnknownQualityKey { profile: String, key: String },

    #[error("Profile '{profile}' has vendor-special parameters or vendor pass style but no vendor flag")]
    MissingVendorFlag { profile: String },

    #[error("Profile '{profile}' has scale-filter parameters but no scale parameter")]
    ScaleParameterWithoutScale { profile: String },

    #[error("Parameter '{key}' in profile '{profile}' is invalid: {message}")]
    InvalidParameter {
        profile: String,
        key: String,
        message: String,
    },
}

/// Validate a typed value against a parameter range
pub fn validate_input(range: &Range, input: &str) -> Result<(), ValidationError> {
    let input = input.trim();
    match range {
        Range::Any => Ok(()),
        Range::Enum { .. } => {
            if range.contains_str(input) {
                Ok(())
            } else {
                Err(ValidationError::NotAllowed {
                    value: input.to_string(),
                    allowed: range.to_string(),
                })
            }
        }
        Range::Int { .. } => {
            let value: i64 = input
                .parse()
                .map_err(|_| ValidationError::NotANumber(input.to_string()))?;
            if range.contains_int(value) {
                Ok(())
            } else {
                Err(ValidationError::OutOfRange {
                    value: input.to_string(),
                    range: range.to_string(),
                })
            }
        }
        Range::Kbps { .. } => {
            let kbps =
                parse_kbps(input).ok_or_else(|| ValidationError::NotANumber(input.to_string()))?;
            if range.contains_float(kbps) {
                Ok(())
            } else {
                Err(ValidationError::OutOfRange {
                    value: input.to_string(),
                    range: range.to_string(),
                })
            }
        }
        Range::Float { .. } => {
            let value: f64 = input
                .parse()
                .ok()
                .filter(|v: &f64| v.is_finite())
                .ok_or_else(|| ValidationError::NotANumber(input.to_string()))?;
            if range.contains_float(value) {
                Ok(())
            } else {
                Err(ValidationError::OutOfRange {
                    value: input.to_string(),
                    range: range.to_string(),
                })
            }
        }
    }
}

/// Bitrate in kbps from a bare integer, a `k` value or an `M` value
fn parse_kbps(input: &str) -> Option<f64> {
    let finite = |v: &f64| v.is_finite();
    if let Some(number) = input.strip_suffix(['k', 'K']) {
        return number.parse().ok().filter(finite);
    }
    if let Some(number) = input.strip_suffix('M') {
        return number.parse::<f64>().ok().filter(finite).map(|v| v * 1000.0);
    }
    // Bare values get the unit appended when rendered, so fractions are out
    input.parse::<i64>().ok().map(|v| v as f64)
}

/// Parse a 1-based menu selection into a 0-based index
pub fn parse_choice(input: &str, count: usize) -> Result<usize, ValidationError> {
    let invalid = || ValidationError::InvalidChoice {
        input: input.to_string(),
        count,
    };
    let index: usize = input.trim().parse().map_err(|_| invalid())?;
    if index >= 1 && index <= count {
        Ok(index - 1)
    } else {
        Err(invalid())
    }
}

/// Parse a single output dimension (positive integer)
pub fn parse_dimension(input: &str) -> Result<u32, ValidationError> {
    match input.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ValidationError::InvalidDimension(input.trim().to_string())),
    }
}

/// Parse an explicit `W:H` resolution. One side may be -1 or -2 (derive from
/// the other side, -2 keeping the derived side even), never both.
pub fn parse_resolution(input: &str) -> Result<(i32, i32), ValidationError> {
    let input = input.trim();
    let invalid = || ValidationError::InvalidResolution(input.to_string());

    let (w, h) = input.split_once(':').ok_or_else(invalid)?;
    let side = |s: &str| -> Option<i32> {
        match s.trim().parse::<i32>() {
            Ok(v) if v > 0 || v == -1 || v == -2 => Some(v),
            _ => None,
        }
    };
    let width = side(w).ok_or_else(invalid)?;
    let height = side(h).ok_or_else(invalid)?;

    if width < 0 && height < 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

fn validate_choice(choices: &[ChoiceDef], value: &str) -> Result<(), ValidationError> {
    if choices.iter().any(|c| c.value == value) {
        Ok(())
    } else {
        Err(ValidationError::NotAllowed {
            value: value.to_string(),
            allowed: choices
                .iter()
                .map(|c| c.value)
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

/// Check every stored value of a profile against its parameter definition.
///
/// Unset values and the "don't change" sentinel are always valid.
pub fn validate_settings(profile: &CodecProfile, settings: &Settings) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for param in profile.params {
        let value = match settings.get(param.key) {
            None | Some(SettingValue::DontChange) => continue,
            Some(value) => value.to_string(),
        };

        let result = match param.kind {
            ParamKind::DirectInput { range } => validate_input(&range, &value),
            ParamKind::Choice { choices } => validate_choice(choices, &value),
            ParamKind::Handled(Handler::Scale) => parse_resolution(&value).map(|_| ()),
        };

        if let Err(reason) = result {
            errors.push(ValidationError::Setting {
                key: param.key.to_string(),
                reason: Box::new(reason),
            });
        }
    }

    errors
}

/// Check a profile definition for internal consistency
pub fn validate_profile_definition(profile: &CodecProfile) -> Result<(), SchemaError> {
    let name = profile.name.to_string();
    let invalid = |key: &str, message: &str| SchemaError::InvalidParameter {
        profile: name.clone(),
        key: key.to_string(),
        message: message.to_string(),
    };

    for (i, param) in profile.params.iter().enumerate() {
        if profile.params[..i].iter().any(|p| p.key == param.key) {
            return Err(SchemaError::DuplicateParameter {
                profile: name.clone(),
                key: param.key.to_string(),
            });
        }

        match param.kind {
            ParamKind::DirectInput {
                range: Range::Int { min, max } | Range::Kbps { min, max },
            } if min > max => return Err(invalid(param.key, "integer range has min > max")),
            ParamKind::DirectInput {
                range: Range::Float { min, max },
            } if min > max => return Err(invalid(param.key, "float range has min > max")),
            ParamKind::Choice { choices } if choices.is_empty() => {
                return Err(invalid(param.key, "choice list is empty"));
            }
            ParamKind::Handled(Handler::Scale) if param.context != Context::VideoFilter => {
                return Err(invalid(param.key, "scale must be a video filter"));
            }
            _ => {}
        }

        if param.context == Context::Meta && param.flag.is_some() {
            return Err(invalid(param.key, "meta parameters are never rendered as flags"));
        }
    }

    for key in [PASSES_KEY, CONTAINER_KEY] {
        match profile.param(key) {
            Some(param) if param.context == Context::Meta => {}
            _ => {
                return Err(SchemaError::MissingMeta {
                    profile: name.clone(),
                    key: key.to_string(),
                });
            }
        }
    }

    if profile.param(profile.quality_key).is_none() {
        return Err(SchemaError::UnknownQualityKey {
            profile: name.clone(),
            key: profile.quality_key.to_string(),
        });
    }

    let has_vendor_params = profile
        .params_by_context(Context::VendorSpecialOption)
        .next()
        .is_some();
    let vendor_passes = profile.pass_style == PassStyle::VendorParam;
    if (has_vendor_params || vendor_passes) && profile.vendor_flag.is_none() {
        return Err(SchemaError::MissingVendorFlag { profile: name });
    }

    let has_scale_params = profile
        .params_by_context(Context::ScaleFilterParameter)
        .next()
        .is_some();
    if has_scale_params && !profile.params.iter().any(|p| p.is_scale()) {
        return Err(SchemaError::ScaleParameterWithoutScale { profile: name });
    }

    Ok(())
}

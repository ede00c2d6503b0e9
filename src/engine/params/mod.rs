/// Codec parameter registry module.
///
/// This module is the single source of truth for what can be tuned per codec
/// profile, how each value is validated, and where it lands in the FFmpeg
/// command. The registry is built once at startup and passed by reference to
/// the editor, the command compiler and the batch driver.
pub mod profiles;
pub mod types;
mod validation;

pub use types::{
    CONTAINER_KEY, ChoiceDef, CodecProfile, Context, DefaultValue, Handler, PASSES_KEY, ParamDef,
    ParamKind, PassStyle, RESET_TOKENS, Range, SCALE_FIX_KEY, SCALE_KEY,
};

pub use validation::{
    SchemaError, ValidationError, parse_choice, parse_dimension, parse_resolution,
    validate_input, validate_profile_definition, validate_settings,
};

/// Immutable table of codec profiles
#[derive(Debug, Clone)]
pub struct Registry {
    profiles: Vec<CodecProfile>,
}

impl Registry {
    /// Build a registry, rejecting inconsistent profile definitions
    pub fn new(profiles: Vec<CodecProfile>) -> Result<Self, SchemaError> {
        for (i, profile) in profiles.iter().enumerate() {
            if profiles[..i]
                .iter()
                .any(|p| p.name.eq_ignore_ascii_case(profile.name))
            {
                return Err(SchemaError::DuplicateProfile(profile.name.to_string()));
            }
            validate_profile_definition(profile)?;
        }

        Ok(Self { profiles })
    }

    /// Registry of the built-in profiles
    pub fn builtin() -> Result<Self, SchemaError> {
        Self::new(profiles::builtin_profiles())
    }

    /// Find a profile by name (case-insensitive)
    ///
    /// # Example
    /// ```ignore
    /// use ffbatch::engine::params::Registry;
    ///
    /// let registry = Registry::builtin()?;
    /// let hevc = registry.lookup("HEVC").expect("hevc profile should exist");
    /// assert_eq!(hevc.video_codec, "libx265");
    /// ```
    pub fn lookup(&self, name: &str) -> Option<&CodecProfile> {
        self.profiles.iter().find(|p| p.matches_name(name))
    }

    /// All profiles in menu order
    pub fn profiles(&self) -> &[CodecProfile] {
        &self.profiles
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.profiles.iter().map(|p| p.name)
    }
}

/// Parameters of `profile` injected into the given command segment, in
/// declaration order
pub fn params_by_context(
    profile: &CodecProfile,
    context: Context,
) -> impl Iterator<Item = &'static ParamDef> {
    profile.params_by_context(context)
}

use crate::args::{LoadArgs, ResolveArgs};
use crate::error::ImageModuleError;
use crate::filter::ImageFilter;
use crate::mime::classify;
use crate::options::ImageOptions;
use crate::plugin::Plugin;
use crate::template::{emit, prepare_source, EmitMode};
use log::{debug, info};
use rand::Rng;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub const PLUGIN_NAME: &str = "image";

/// Prefix of the identifier reserved for the shared encoder module.
pub const ENCODER_VIRTUAL_ID_PREFIX: &str = "$image-plugin-encoder-virtual-id";

/// Source of the encoder module imported by every `Const` image module.
pub const ENCODER_HELPER_SOURCE: &str =
    "export function e(data) { return encodeURIComponent(data); };";

lazy_static! {
    // Random suffix so the identifier is unlikely to equal a real path
    static ref ENCODER_VIRTUAL_ID: String = format!(
        "{}{}",
        ENCODER_VIRTUAL_ID_PREFIX,
        rand::thread_rng().gen_range(1..=100_000u32)
    );
}

/// Identifier of the encoder virtual module for this process.
pub fn encoder_virtual_id() -> &'static str {
    ENCODER_VIRTUAL_ID.as_str()
}

/// A module this plugin knows how to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleRef {
    /// The shared `encodeURIComponent` wrapper
    EncoderHelper,
    /// A file on disk, possibly an image
    File(PathBuf),
}

impl ModuleRef {
    pub fn from_id(id: &str) -> Self {
        if id == encoder_virtual_id() {
            ModuleRef::EncoderHelper
        } else {
            ModuleRef::File(PathBuf::from(id))
        }
    }

    /// The identifier the bundler knows this module by.
    pub fn id(&self) -> Cow<'_, str> {
        match self {
            ModuleRef::EncoderHelper => Cow::Borrowed(encoder_virtual_id()),
            ModuleRef::File(path) => path.to_string_lossy(),
        }
    }
}

/// Loads image files as ES modules.
///
/// Holds the immutable plugin options and the compiled include/exclude filter.
#[derive(Debug, Clone)]
pub struct ImageModuleLoader {
    options: ImageOptions,
    filter: ImageFilter,
}

impl ImageModuleLoader {
    /// Creates a loader whose relative filter globs resolve against the current directory.
    pub fn try_new(options: ImageOptions) -> Result<Self, ImageModuleError> {
        let filter = ImageFilter::new(&options.include, &options.exclude)?;
        Ok(Self { options, filter })
    }

    pub fn with_filter_base(options: ImageOptions, base: &Path) -> Result<Self, ImageModuleError> {
        let filter = ImageFilter::with_base(&options.include, &options.exclude, base)?;
        Ok(Self { options, filter })
    }

    pub fn options(&self) -> &ImageOptions {
        &self.options
    }

    fn mode(&self) -> EmitMode {
        EmitMode::from_dom_flag(self.options.dom)
    }

    /// Resolves the encoder virtual module, anything else is left to the bundler.
    pub fn resolve(&self, specifier: &str) -> Option<ModuleRef> {
        match ModuleRef::from_id(specifier) {
            ModuleRef::EncoderHelper => Some(ModuleRef::EncoderHelper),
            ModuleRef::File(_) => None,
        }
    }

    /// Loads a module, returning `None` for files that are filtered out or not images.
    pub fn load_ref(&self, module: &ModuleRef) -> Result<Option<String>, ImageModuleError> {
        match module {
            ModuleRef::EncoderHelper => Ok(Some(ENCODER_HELPER_SOURCE.to_string())),
            ModuleRef::File(path) => self.load_image(path),
        }
    }

    fn load_image(&self, path: &Path) -> Result<Option<String>, ImageModuleError> {
        let id = path.to_string_lossy();
        if !self.filter.accepts(&id) {
            debug!("Skipping filtered module: {id}");
            return Ok(None);
        }

        let Some(media_type) = classify(&id) else {
            // not an image
            return Ok(None);
        };

        info!("Loading image: {id} ({media_type})");
        let bytes = std::fs::read(path).map_err(|source| ImageModuleError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let format = media_type.source_format();
        let source = prepare_source(format, &bytes);
        Ok(Some(emit(self.mode(), media_type, format, &source)))
    }
}

impl Plugin for ImageModuleLoader {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn resolve_id(&self, args: &ResolveArgs) -> Result<Option<String>, ImageModuleError> {
        Ok(self
            .resolve(args.specifier)
            .map(|module| module.id().into_owned()))
    }

    fn load(&self, args: &LoadArgs) -> Result<Option<String>, ImageModuleError> {
        self.load_ref(&ModuleRef::from_id(args.id))
    }
}

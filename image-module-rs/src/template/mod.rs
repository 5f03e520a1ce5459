//! Source text generation for image modules.
//!
//! Two module shapes are produced:
//! - `Const`: a default export holding the `data:` URI string. Text payloads go
//!   through the shared `e` helper imported from the encoder virtual module.
//! - `Dom`: a default export holding an `Image` whose `src` is the data URI.
//!
//! Every function here is pure. Reading files is left to the module loader.

pub mod text;

use crate::mime::{MediaType, SourceFormat};
use crate::module_loader::encoder_virtual_id;
use base64::Engine;
use text::{double_quoted, single_quoted, strip_line_breaks};

/// Shape of the generated module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    #[default]
    Const,
    Dom,
}

impl EmitMode {
    pub fn from_dom_flag(dom: bool) -> Self {
        if dom {
            EmitMode::Dom
        } else {
            EmitMode::Const
        }
    }
}

/// Converts raw file bytes into the payload embedded in the module.
///
/// Binary images are base64 encoded, text images are decoded as UTF-8 (invalid
/// sequences are replaced). Line breaks are removed in both cases.
pub fn prepare_source(format: SourceFormat, bytes: &[u8]) -> String {
    let source = match format {
        SourceFormat::Base64 => base64::engine::general_purpose::STANDARD.encode(bytes),
        SourceFormat::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
    };
    strip_line_breaks(&source)
}

/// Generates the module source for an image payload.
pub fn emit(mode: EmitMode, media_type: MediaType, format: SourceFormat, source: &str) -> String {
    let code = match mode {
        EmitMode::Dom => dom_template(media_type, format, source),
        EmitMode::Const => const_template(media_type, format, source),
    };
    code.trim().to_string()
}

fn dom_template(media_type: MediaType, format: SourceFormat, source: &str) -> String {
    // The data URI is always labelled base64 here; text payloads are converted
    // with `btoa` when the module is evaluated.
    let source = match format {
        SourceFormat::Base64 => single_quoted(source),
        SourceFormat::Utf8 => format!("btoa({})", single_quoted(source)),
    };
    format!(
        r#"
const img = new Image();
const source = {source};
img.src = 'data:{mime};base64,' + source;
export default img;
"#,
        mime = media_type.mime(),
    )
}

fn const_template(media_type: MediaType, format: SourceFormat, source: &str) -> String {
    let value = match format {
        SourceFormat::Base64 => "source",
        SourceFormat::Utf8 => "e(source)",
    };
    format!(
        r#"
import {{e}} from {helper};
const source = {source};
const img = 'data:{mime};{format},' + {value};
export default img;
"#,
        helper = double_quoted(encoder_virtual_id()),
        source = single_quoted(source),
        mime = media_type.mime(),
        format = format.tag(),
    )
}

/// Percent-encodes text the way `encodeURIComponent` does.
pub fn encode_uri_component(s: &str) -> String {
    // urlencoding leaves only `A-Za-z0-9-_.~` alone, encodeURIComponent also keeps `!'()*`
    urlencoding::encode(s)
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%2A", "*")
}

/// Builds the data URI a `Const` module evaluates to.
pub fn data_uri(media_type: MediaType, format: SourceFormat, source: &str) -> String {
    let payload = match format {
        SourceFormat::Base64 => source.to_string(),
        SourceFormat::Utf8 => encode_uri_component(source),
    };
    format!("data:{};{},{}", media_type.mime(), format.tag(), payload)
}

use anyhow::{bail, Context};
use clap::Parser;
use image_module_rs::module_loader::ENCODER_HELPER_SOURCE;
use image_module_rs::template::{data_uri, prepare_source};
use image_module_rs::{classify, ImageModuleLoader, ImageOptions, LoadArgs, Plugin};
use log::debug;
use std::path::PathBuf;

/// image-module: A utility for turning image files into ES modules that export data URIs
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to input image file
    #[clap(short, long, required_unless_present = "print_helper")]
    pub input: Option<PathBuf>,

    /// Path to output module file to be created. Written to stdout when omitted
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Export an Image object instead of a data URI string
    #[clap(long)]
    pub dom: bool,

    /// Only handle files matching this glob. May be repeated
    #[clap(long)]
    pub include: Vec<String>,

    /// Skip files matching this glob. May be repeated
    #[clap(long)]
    pub exclude: Vec<String>,

    /// Path to a JSON file with plugin options ({"dom", "include", "exclude"})
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Print the shared encoder module instead of an image module
    #[clap(long)]
    pub print_helper: bool,

    /// Print only the data URI of the image
    #[clap(long, conflicts_with = "dom")]
    pub print_uri: bool,
}

fn build_options(args: &Args) -> Result<ImageOptions, anyhow::Error> {
    let base = match &args.config {
        Some(config) => {
            let config_str = std::fs::read_to_string(config)
                .with_context(|| format!("Failed to read config file: {}", config.display()))?;
            ImageOptions::from_json_str(&config_str)
                .with_context(|| format!("Failed to parse config file: {}", config.display()))?
        }
        None => ImageOptions::default(),
    };

    let mut overrides = ImageOptions::new().dom(args.dom);
    for glob in &args.include {
        overrides = overrides.include(glob.as_str());
    }
    for glob in &args.exclude {
        overrides = overrides.exclude(glob.as_str());
    }
    Ok(base.merge(overrides))
}

fn render(args: &Args) -> Result<String, anyhow::Error> {
    if args.print_helper {
        return Ok(ENCODER_HELPER_SOURCE.to_string());
    }
    let Some(input) = &args.input else {
        bail!("No input file given");
    };
    // Bundlers hand plugins absolute ids, and relative filter globs resolve against the cwd
    let input = std::path::absolute(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let id = input.to_string_lossy();

    let options = build_options(args)?;
    debug!("Plugin options: {:?}", options);
    let loader = ImageModuleLoader::try_new(options)?;

    let Some(code) = loader.load(&LoadArgs::new(&id))? else {
        bail!("Not an image handled by the {} plugin: {}", loader.name(), id);
    };

    if args.print_uri {
        // load already accepted the file, so it classifies
        let Some(media_type) = classify(&id) else {
            bail!("Not an image: {}", id);
        };
        let format = media_type.source_format();
        let bytes = std::fs::read(&input)
            .with_context(|| format!("Failed to read input file: {}", input.display()))?;
        return Ok(data_uri(media_type, format, &prepare_source(format, &bytes)));
    }

    Ok(code)
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let args: Args = Args::parse();

    let code = render(&args)?;

    match &args.output {
        Some(output) => std::fs::write(output, code)
            .with_context(|| format!("Failed to write module to {}", output.display()))?,
        None => println!("{code}"),
    }
    Ok(())
}

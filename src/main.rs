//! makedds CLI - Command-line tool for assembling and inspecting DDS textures.
//!
//! This is the main entry point for the makedds command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use makedds::dds::FORMAT_TABLE;
use makedds::prelude::*;
use makedds::probe::{bmfont, tga, wav};

/// Data chunks listed per WAV file.
const MAX_WAV_CLIPS: usize = 64;

/// makedds - DDS texture assembly tool
#[derive(Parser)]
#[command(name = "makedds")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a DDS file from source images
    Build(BuildArgs),

    /// Print the headers and level layout of a DDS file
    Info {
        /// Input DDS file
        input: PathBuf,
    },

    /// Describe a WAV, TGA or BMFont file
    Probe {
        /// Input file
        input: PathBuf,
    },

    /// Encode or decode base64
    Base64 {
        #[command(subcommand)]
        command: Base64Command,
    },

    /// List the known DXGI formats
    Formats,
}

#[derive(Args)]
struct BuildArgs {
    /// Source images, in element order
    inputs: Vec<PathBuf>,

    /// Output DDS file
    #[arg(short, long, env = "MAKEDDS_OUTPUT")]
    output: PathBuf,

    /// JSON build description; its SourceFiles follow the positional inputs
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output width (defaults to the first source)
    #[arg(long)]
    width: Option<u32>,

    /// Output height (defaults to the first source)
    #[arg(long)]
    height: Option<u32>,

    /// DXGI format name, with or without the DXGI_FORMAT_ prefix
    #[arg(short, long)]
    format: Option<String>,

    /// Alpha mode: straight, premultiplied, opaque or custom
    #[arg(long)]
    alpha: Option<String>,

    /// Generate mipmaps
    #[arg(long)]
    mipmaps: bool,

    /// Limit the mip chain, base level included
    #[arg(long)]
    max_mip_levels: Option<u32>,

    /// Treat every six sources as the faces of a cubemap
    #[arg(long)]
    cubemap: bool,

    /// Treat the sources as slices of a volume texture
    #[arg(long)]
    volume: bool,

    /// Number of array elements
    #[arg(long)]
    array_size: Option<u32>,

    /// Round dimensions up to powers of two
    #[arg(long)]
    force_pow2: bool,
}

#[derive(Subcommand)]
enum Base64Command {
    /// Encode a binary file as a single base64 line
    Encode {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Decode base64 text, skipping characters outside the alphabet
    Decode {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Build(args) => cmd_build(&args)?,
        Commands::Info { input } => cmd_info(&input)?,
        Commands::Probe { input } => cmd_probe(&input)?,
        Commands::Base64 { command } => match command {
            Base64Command::Encode { input, output } => cmd_base64_encode(&input, &output)?,
            Base64Command::Decode { input, output } => cmd_base64_decode(&input, &output)?,
        },
        Commands::Formats => cmd_formats(),
    }

    Ok(())
}

/// `RUST_LOG` still takes precedence over the flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Merge the optional build description with the command line flags.
///
/// Flags win over the description. Relative `SourceFiles` entries are
/// resolved against the directory holding the description.
fn surface_params(args: &BuildArgs) -> Result<(SurfaceParams, Vec<PathBuf>)> {
    let mut sources = args.inputs.clone();

    let mut params = match &args.config {
        Some(path) => {
            let config = BuildConfig::load(path)
                .with_context(|| format!("Failed to load build description {}", path.display()))?;
            let base = path.parent().unwrap_or(Path::new(""));
            sources.extend(config.source_files.iter().map(|file| base.join(file)));
            config.params
        }
        None => SurfaceParams::default(),
    };

    if let Some(width) = args.width {
        params.width = width;
    }
    if let Some(height) = args.height {
        params.height = height;
    }
    if let Some(name) = &args.format {
        params.format = DxgiFormat::from_name(name)?;
    }
    if let Some(name) = &args.alpha {
        params.alpha_mode = AlphaMode::from_name(name)?;
    }
    if let Some(levels) = args.max_mip_levels {
        params.max_mip_levels = levels;
    }
    if let Some(size) = args.array_size {
        params.array_size = size;
    }
    params.mipmaps |= args.mipmaps;
    params.cubemap |= args.cubemap;
    params.volume |= args.volume;
    params.force_pow2 |= args.force_pow2;

    Ok((params, sources))
}

fn cmd_build(args: &BuildArgs) -> Result<()> {
    let (params, sources) = surface_params(args)?;
    if sources.is_empty() {
        anyhow::bail!("No source images given; pass them as arguments or through SourceFiles");
    }

    println!("Building {} from {} source(s)", args.output.display(), sources.len());

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let summary = build_dds_with_progress(params, &sources, &args.output, |index, path| {
        pb.set_position(index as u64);
        pb.set_message(path.display().to_string());
    })
    .context("Failed to build DDS file")?;

    pb.finish_with_message("Done");

    let layout = summary.layout;
    println!(
        "Wrote {}x{} {} ({} level(s), {} element(s)) in {:?}: {} bytes",
        layout.width,
        layout.height,
        layout.format,
        layout.levels,
        layout.array_size * layout.faces(),
        start.elapsed(),
        summary.bytes_written
    );

    Ok(())
}

fn cmd_info(input: &Path) -> Result<()> {
    let data = load_binary(input).context("Failed to read input file")?;
    let file = DdsFile::parse(&data).context("Failed to parse DDS file")?;

    let header = file.header;
    let (width, height, depth) = (header.width, header.height, header.depth);
    let (mipmap_count, pitch) = (header.mipmap_count, header.pitch_or_linear_size);

    println!("File: {}", input.display());
    println!("Size: {width}x{height}, depth {depth}");
    println!("Format: {}", file.format());
    println!("Pitch/linear size: {pitch}");
    println!("Mipmap count: {mipmap_count}");
    println!("Flags: {:?}", header.header_flags());
    println!("Caps: {:?} {:?}", header.caps_flags(), header.caps2_flags());

    let pixel_format = header.pixel_format;
    let (four_cc, bit_count) = (pixel_format.four_cc, pixel_format.rgb_bit_count);
    println!(
        "Pixel format: {:?}, FourCC {:?}, {bit_count} bits, masks {:08x?}",
        pixel_format.pixel_flags(),
        String::from_utf8_lossy(&four_cc.0),
        pixel_format.masks()
    );

    if let Some(ex) = file.header_dxt10 {
        let array_size = ex.array_size;
        println!(
            "DX10: dimension {:?}, misc {:?}, array size {array_size}, alpha {}",
            ex.dimension(),
            ex.misc_flags(),
            ex.alpha_mode()
        );
    }

    println!(
        "Cubemap: {}, volume: {}, array: {}, mipmaps: {}",
        file.is_cubemap(),
        file.is_volume(),
        file.is_array(),
        file.has_mipmaps()
    );
    println!(
        "Elements: {}, levels per element: {}",
        file.array_count(),
        file.level_count()
    );

    let levels = file.levels();
    for level in &levels {
        println!(
            "  [{}:{}] {}x{}x{} row {} slice {} size {} at {}",
            level.element,
            level.index,
            level.width,
            level.height,
            level.slices,
            level.bytes_per_row,
            level.bytes_per_slice,
            level.data_size,
            level.offset
        );
    }

    let used: usize = levels.iter().map(|level| level.data_size).sum();
    if used != file.blob.len() {
        println!("Described {} of {} data bytes", used, file.blob.len());
    }

    Ok(())
}

fn cmd_probe(input: &Path) -> Result<()> {
    let data = load_binary(input).context("Failed to read input file")?;
    let extension = input.extension().and_then(|e| e.to_str());
    let kind = sniff(&data, extension).context("Unrecognized container; expected WAV, TGA or BMFont")?;

    println!("{}: {}", input.display(), kind.name());

    match kind {
        ContainerKind::Wav => print_wav(&data),
        ContainerKind::Tga => print_tga(&data),
        ContainerKind::BmFont => print_bmfont(&data),
    }
}

fn print_wav(data: &[u8]) -> Result<()> {
    let probe = wav::describe(data, MAX_WAV_CLIPS).context("Failed to read WAV file")?;

    let format = *probe.format();
    let (compression, channels) = (format.compression_type, format.channel_count);
    let (rate, bits) = (format.sample_rate, format.bits_per_sample);
    println!("Compression {compression}, {channels} channel(s), {rate} Hz, {bits} bits");

    match probe {
        wav::WavProbe::Pcm { clips, .. } => {
            for (index, clip) in clips.iter().enumerate() {
                println!(
                    "  clip {index}: {} bytes, {} frames, {:.3}s",
                    clip.data_size, clip.sample_count, clip.duration
                );
            }
        }
        wav::WavProbe::Unsupported { .. } => println!("  not PCM; clips not described"),
    }

    Ok(())
}

fn print_tga(data: &[u8]) -> Result<()> {
    let desc = tga::describe(data).context("Failed to read TGA file")?;

    println!(
        "Type {:?}, {}x{}, {} bpp, origin {}",
        desc.image_type,
        desc.width,
        desc.height,
        desc.bits_per_pixel,
        if desc.origin_bottom { "bottom" } else { "top" }
    );
    if desc.colormap_type != 0 {
        println!(
            "Colormap: {} entries from {}, {} bits each",
            desc.cmap_length, desc.cmap_first_entry, desc.cmap_entry_size
        );
    }
    println!("Decoded size: {} bytes", desc.pixel_data_size);

    if let Ok(footer) = tga::footer(data) {
        let (extension, developer) = (footer.extension_offset, footer.developer_offset);
        println!("TGA 2.0 footer: extension area {extension}, developer area {developer}");
    }

    Ok(())
}

fn print_bmfont(data: &[u8]) -> Result<()> {
    let desc = bmfont::describe(data).context("Failed to read BMFont file")?;

    println!("Version {}", desc.version);
    if let Some(info) = desc.info {
        let size = info.font_size;
        println!(
            "Font {:?}, size {size}, {:?}",
            desc.font_name.unwrap_or_default(),
            info.attributes()
        );
    }
    if let Some(common) = desc.common {
        let (line_height, base) = (common.line_height, common.base_line);
        let (scale_w, scale_h) = (common.scale_width, common.scale_height);
        println!("Line height {line_height}, base {base}, texture {scale_w}x{scale_h}");
    }
    for (index, name) in desc.page_names().enumerate() {
        println!("  page {index}: {name}");
    }
    println!("{} glyph(s), {} kerning pair(s)", desc.chars.len(), desc.kerning.len());

    Ok(())
}

fn cmd_base64_encode(input: &Path, output: &Path) -> Result<()> {
    let data = load_binary(input).context("Failed to read input file")?;
    fs::write(output, base64::encode(&data)).context("Failed to write output file")?;
    Ok(())
}

fn cmd_base64_decode(input: &Path, output: &Path) -> Result<()> {
    let text = load_text(input).context("Failed to read input file")?;
    fs::write(output, base64::decode(text.as_bytes())).context("Failed to write output file")?;
    Ok(())
}

fn cmd_formats() {
    for info in FORMAT_TABLE.iter() {
        println!(
            "{:>3} {:<32} {:>3} bpp {:>2} bytes/block",
            info.format.code(),
            info.name,
            info.bits_per_pixel,
            info.bytes_per_block
        );
    }
}

use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use lenslet::{
    timed, AperturePaint, LensletArray, LensletConfig, LensletRenderer,
    RenderConfig,
};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for generating hexagonal lenslet arrays for near-eye displays.
#[derive(Debug, StructOpt)]
#[structopt(name = "lenslet")]
struct Opt {
    /// Path to a config file that defines the array to be generated.
    /// Supported formats: JSON, TOML. If neither this nor `--input` is given,
    /// the default config is used
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Path to an existing .json lenslet array file to load
    #[structopt(short, long)]
    input: Option<PathBuf>,

    /// If given, the generated array will be saved to this directory. The
    /// exact files that appear in the directory are defined by the output
    /// formats. See `--output-formats` for more info
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output the array in. Supported formats:
    ///
    /// cfg - The full config object used for the array, in TOML format
    ///
    /// json - JSON representation, which can be reloaded with `--input`
    ///
    /// svg - 2D top-down rendering of the lens apertures
    ///
    /// stl - 3D mesh of the lens apertures
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// What determines the color of each lens aperture. Only relevant for
    /// rendered output formats, such as SVG. Options: flat, tilt, area
    #[structopt(long, default_value = "tilt")]
    paint: AperturePaint,

    /// Hide the eyebox lattice hexagons underneath each lens? Only relevant
    /// for rendered output formats, such as SVG.
    #[structopt(long)]
    hide_lattice: bool,

    /// The logging level to use during generation. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Export the array's full config in a human-readable file
    Cfg,
    /// Export the array in a serialized JSON format, which can be
    /// deserialized later to recover the array
    Json,
    /// Render the array as a 2D SVG
    Svg,
    /// Render the array as a 3D STL
    Stl,
    /* If you change this, make sure to update the help text for
     * `--output-formats`! */
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Cfg => "toml",
            Self::Json => "json",
            Self::Svg => "svg",
            Self::Stl => "stl",
        }
    }
}

fn load_config(config_path: &Path) -> anyhow::Result<LensletConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

fn load_array(input_path: &Path) -> anyhow::Result<LensletArray> {
    let json = fs::read_to_string(input_path).with_context(|| {
        format!("error reading lenslet file {:?}", input_path)
    })?;
    LensletArray::from_json(&json)
}

/// Generate an output form of the array in the given format.
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    array: &LensletArray,
    renderer: &LensletRenderer,
) -> anyhow::Result<()> {
    fn generate_bytes(
        output_format: OutputFormat,
        array: &LensletArray,
        renderer: &LensletRenderer,
    ) -> anyhow::Result<Vec<u8>> {
        let bytes = match output_format {
            OutputFormat::Cfg => {
                // Serialize just the config via toml
                toml::to_string_pretty(array.config())
                    .context("error serializing config")?
                    .into_bytes()
            }
            OutputFormat::Json => {
                // Serialize the entire array via JSON
                array.to_json().into_bytes()
            }
            OutputFormat::Svg => {
                // Render the apertures in 2D
                renderer.render_as_svg(array).into_bytes()
            }
            OutputFormat::Stl => {
                // Render the apertures in 3D
                renderer.render_as_stl(array)
            }
        };
        Ok(bytes)
    }

    let output_file_path = output_dir
        .join("lenslets")
        .with_extension(output_format.file_ext());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        {
            let bytes = generate_bytes(output_format, array, renderer)?;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&output_file_path)
                .with_context(|| {
                    format!("error opening output file {:?}", &output_file_path)
                })?;
            file.write_all(&bytes).with_context(|| {
                format!("error writing to file {:?}", &output_file_path)
            })?;
        }
    );

    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let array = match opt {
        Opt {
            config: Some(config_path),
            input: None,
            ..
        } => {
            // Load config and use it to generate a new array
            let config = load_config(&config_path)?;
            LensletArray::generate(config)?
        }
        Opt {
            config: None,
            input: Some(input_path),
            ..
        } => {
            // Load an existing array from a file
            let array = load_array(&input_path)?;
            info!("Loaded lenslet array from {:?}", &input_path);
            array
        }
        Opt {
            config: None,
            input: None,
            ..
        } => {
            info!("No config given, using the default");
            LensletArray::generate(LensletConfig::default())?
        }
        _ => bail!(
            "can't pass both --config (to generate a new array) \
            and --input (to load an existing array)"
        ),
    };
    info!(
        "{} lenses, {} dropped tiles",
        array.lenses().len(),
        array.dropped_tiles().len()
    );

    // If an output dir was specified, write out output format(s) there
    if let Some(output_dir) = opt.output {
        if opt.output_formats.is_empty() {
            bail!("output dir was specified, but no output formats were given")
        }
        fs::create_dir_all(&output_dir)?;

        let renderer = LensletRenderer::new(RenderConfig {
            aperture_paint: opt.paint,
            show_lattice: !opt.hide_lattice,
            ..Default::default()
        })
        .context("invalid render config")?;
        for output_format in opt.output_formats {
            gen_output(&output_dir, output_format, &array, &renderer)?;
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}

use anyhow::{Context, Result};
use base64::Engine as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use period_bars::models::{NewUserData, RevenueByCategoryData, RevenueSharesData};
use period_bars::request::ChartRequest;
use period_bars::{DatasetPayload, Orientation, RenderConfig};
use serde::de::DeserializeOwned;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "period-bars",
    version,
    about = "Render period-over-period grouped bar charts to PNG"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a chart from a JSON request body.
    Render(RenderArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Kind {
    /// Revenue per category with share percentages (caller order, vertical).
    RevenueShares,
    /// Revenue per category, sorted by the current period.
    RevenueByCategory,
    /// New-user counts per category, sorted by the current period.
    NewUsers,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Encoding {
    /// Raw PNG bytes.
    Png,
    /// PNG bytes as standard base64 text.
    Base64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OrientationArg {
    Vertical,
    Horizontal,
}

impl From<OrientationArg> for Orientation {
    fn from(o: OrientationArg) -> Self {
        match o {
            OrientationArg::Vertical => Orientation::Vertical,
            OrientationArg::Horizontal => Orientation::Horizontal,
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Shape of `chart_data` in the request.
    #[arg(short, long, value_enum)]
    kind: Kind,
    /// JSON request file (`-` for stdin).
    #[arg(short, long, default_value = "-")]
    input: PathBuf,
    /// Output file (`-` for stdout).
    #[arg(short, long, default_value = "-")]
    out: PathBuf,
    /// Output encoding.
    #[arg(long, value_enum, default_value_t = Encoding::Png)]
    encoding: Encoding,
    /// Override bar orientation.
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,
    /// Override figure width (inches).
    #[arg(long)]
    width: Option<f64>,
    /// Override figure height (inches).
    #[arg(long)]
    height: Option<f64>,
    /// Override resolution (dots per inch).
    #[arg(long)]
    dpi: Option<u32>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let body = read_input(&args.input)?;
    let (payload, mut config) = match args.kind {
        Kind::RevenueShares => parse::<RevenueSharesData>(&body)?,
        Kind::RevenueByCategory => parse::<RevenueByCategoryData>(&body)?,
        Kind::NewUsers => parse::<NewUserData>(&body)?,
    };
    if let Some(o) = args.orientation {
        config.orientation = o.into();
    }
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }
    if let Some(dpi) = args.dpi {
        config.dpi = dpi;
    }

    let png = period_bars::render(&payload, &config)?;
    log::info!(
        "rendered {:?} chart, {}x{}px, {} bytes",
        payload.kind(),
        png.width(),
        png.height(),
        png.len()
    );

    let out = match args.encoding {
        Encoding::Png => png.into_bytes(),
        Encoding::Base64 => base64::engine::general_purpose::STANDARD
            .encode(png.as_bytes())
            .into_bytes(),
    };
    write_output(&args.out, &out)?;
    if args.out != Path::new("-") {
        eprintln!("Wrote chart to {}", args.out.display());
    }
    Ok(())
}

fn parse<D>(body: &str) -> Result<(DatasetPayload, RenderConfig)>
where
    D: DeserializeOwned + Into<DatasetPayload>,
{
    let req: ChartRequest<D> =
        serde_json::from_str(body).context("request body does not match the chart kind")?;
    Ok(req.into_parts())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut s = String::new();
        std::io::stdin()
            .read_to_string(&mut s)
            .context("reading request from stdin")?;
        Ok(s)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if path == Path::new("-") {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()?;
        Ok(())
    } else {
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
    }
}

//! CLI argument definitions for exofinder

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use exofinder::constants::DEFAULT_BIND_ADDR;

#[derive(Parser)]
#[command(name = "exofinder")]
#[command(about = "Locate exoplanets on the sky from their orbital elements")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the exoplanet TCP service
    Serve(ServeArgs),

    /// Solve one request locally and print the reply
    Compute(ComputeArgs),

    /// Send one request to a running service
    Query(QueryArgs),

    /// Export a batch of requests as an OBJ point cloud
    Obj(ObjArgs),
}

#[derive(Parser)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "EXOFINDER_BIND", default_value = DEFAULT_BIND_ADDR)]
    pub bind: String,

    /// Close kept-alive sessions idle for this many seconds
    #[arg(long)]
    pub idle_timeout: Option<u64>,
}

#[derive(Parser)]
pub struct ComputeArgs {
    /// JSON request; read from stdin when omitted
    pub request: Option<String>,

    /// Locate the body at this date instead of `unix_time` (e.g. "2024-03-01T12:00:00 UTC")
    #[arg(long)]
    pub at: Option<String>,

    /// Print a table instead of the JSON reply
    #[arg(long)]
    pub table: bool,
}

#[derive(Parser)]
pub struct QueryArgs {
    /// Address of the running service
    #[arg(long, env = "EXOFINDER_ADDR", default_value = "127.0.0.1:2222")]
    pub addr: String,

    /// JSON request; read from stdin when omitted
    pub request: Option<String>,
}

#[derive(Parser)]
pub struct ObjArgs {
    /// JSON file holding an array of requests
    #[arg(long)]
    pub input: Utf8PathBuf,

    /// Target screen width
    #[arg(long, default_value = "1920")]
    pub width: f64,

    /// Target screen height
    #[arg(long, default_value = "1080")]
    pub height: f64,

    /// Emit `p` point elements instead of `v` vertices
    #[arg(long)]
    pub points: bool,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,
}

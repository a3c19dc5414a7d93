//! exofinder: command-line front end of the exoplanet locator

mod cli;

use std::{io::Read, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ComputeArgs, ObjArgs, QueryArgs, ServeArgs};
use exofinder::{
    display::ExoplanetsDisplayExt,
    exofinder_errors::ExofinderError,
    exoplanet::Exoplanet,
    server::{client::send_request, Server, ServerConfig},
    time::date_to_unix_seconds,
    visualization::{generate_obj_data, ObjElement},
};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries replies, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Compute(args) => compute(args),
        Commands::Query(args) => query(args).await,
        Commands::Obj(args) => obj(args),
    }
}

fn request_or_stdin(request: Option<String>) -> Result<String> {
    match request {
        Some(request) => Ok(request),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read the request from stdin")?;
            Ok(buf)
        }
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig::builder()
        .bind_addr(args.bind)
        .idle_timeout(args.idle_timeout.map(Duration::from_secs))
        .build()?;

    let server = Server::bind(config).await?;
    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "cannot listen for Ctrl-C, running until killed");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    info!("exoplanet service stopped");
    Ok(())
}

fn compute(args: ComputeArgs) -> Result<()> {
    let request = request_or_stdin(args.request)?;
    let mut planet = Exoplanet::from_request_bytes(request.as_bytes())?;

    if let Some(date) = args.at.as_deref() {
        planet.unix_time = date_to_unix_seconds(date)?;
    }

    let reply = planet.reply()?;
    if args.table {
        println!("{}", [planet].show());
    } else {
        println!("{reply}");
    }
    Ok(())
}

async fn query(args: QueryArgs) -> Result<()> {
    let request = request_or_stdin(args.request)?;
    match send_request(args.addr.as_str(), request.trim()).await? {
        Some(reply) => {
            println!("{reply}");
            Ok(())
        }
        None => bail!("the service closed the session without replying (malformed request?)"),
    }
}

fn obj(args: ObjArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input))?;
    let requests: Value =
        serde_json::from_str(&text).with_context(|| format!("{} is not JSON", args.input))?;
    let Some(requests) = requests.as_array() else {
        bail!("{} must hold a JSON array of requests", args.input);
    };

    let mut located = Vec::with_capacity(requests.len());
    for (i, request) in requests.iter().enumerate() {
        let mut planet = Exoplanet::from_request(request)?;
        match planet.locate() {
            Ok(()) => located.push(planet),
            Err(e @ ExofinderError::KeplerNotConverged { .. }) => {
                warn!(index = i, error = %e, "skipping body")
            }
            Err(e) => return Err(e.into()),
        }
    }

    if located.is_empty() {
        bail!("no body of {} could be located", args.input);
    }

    let element = if args.points {
        ObjElement::Point
    } else {
        ObjElement::Vertex
    };
    let obj = generate_obj_data(&located, args.width, args.height, element)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &obj.data).with_context(|| format!("failed to write {path}"))?;
            info!(bodies = located.len(), bytes = obj.size, %path, "point cloud written");
        }
        None => print!("{}", obj.data),
    }
    Ok(())
}

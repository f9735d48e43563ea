//! Lantern CLI
//!
//! Node-discovery beacon for UDP peer-to-peer networks.

mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand_core::OsRng;

use config::Config;
use lantern_crypto::NodeIdentity;
use lantern_node::Node;
use lantern_wire::Endpoint;

/// Lantern - send and receive signed discovery packets
#[derive(Parser)]
#[command(name = "lantern")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a signed ping to a peer
    Ping {
        /// Target IPv4 address
        address: String,

        /// Target UDP port
        #[arg(long, default_value_t = 30303)]
        udp_port: i64,

        /// Target TCP port (defaults to the UDP port)
        #[arg(long)]
        tcp_port: Option<i64>,
    },

    /// Bind the UDP socket and print inbound datagrams
    Listen {
        /// Exit after this many datagrams (0 = run until interrupted)
        #[arg(short, long, default_value_t = 0)]
        count: u64,
    },

    /// Generate a node key and write it to the configured path
    Keygen {
        /// Output file (defaults to the configured key path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing key file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default()?,
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose {
            "debug".to_string()
        } else {
            config.logging.level.clone()
        })
        .init();

    match cli.command {
        Commands::Ping {
            address,
            udp_port,
            tcp_port,
        } => {
            let target = Endpoint::from_parts(&address, udp_port, tcp_port.unwrap_or(udp_port))?;
            send_ping(target, &config).await?;
        }
        Commands::Listen { count } => {
            listen(count, &config).await?;
        }
        Commands::Keygen { output, force } => {
            generate_key(output, force, &config)?;
        }
    }

    Ok(())
}

/// Send one signed ping and report the envelope hash
async fn send_ping(target: Endpoint, config: &Config) -> anyhow::Result<()> {
    let identity = NodeIdentity::load(&config.node.private_key_file)?;
    let node = Node::bind(identity, config.local_endpoint()?).await?;

    let hash = node.ping(&target).await?;

    println!("ping sent to {target}");
    println!("envelope hash: {}", hex::encode(hash));

    Ok(())
}

/// Run the receive loop, printing each inbound datagram
async fn listen(count: u64, config: &Config) -> anyhow::Result<()> {
    let identity = NodeIdentity::load(&config.node.private_key_file)?;
    let node = Node::bind(identity, config.local_endpoint()?).await?;

    let (mut datagrams, handle) = node.listen();
    println!(
        "listening on udp port {} (ctrl-c to stop)",
        node.local_endpoint().udp_port()
    );

    let mut received = 0u64;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                break;
            }
            datagram = datagrams.recv() => {
                let Some(datagram) = datagram else {
                    break;
                };
                received += 1;
                println!(
                    "received {} bytes from {}",
                    datagram.bytes.len(),
                    datagram.source
                );
                if count != 0 && received >= count {
                    break;
                }
            }
        }
    }

    handle.shutdown().await;
    node.close().await?;
    println!("received {received} datagram(s)");

    Ok(())
}

/// Generate a fresh node key
fn generate_key(output: Option<PathBuf>, force: bool, config: &Config) -> anyhow::Result<()> {
    let path = output.unwrap_or_else(|| config.node.private_key_file.clone());

    if path.exists() && !force {
        anyhow::bail!(
            "key file {} already exists (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let identity = NodeIdentity::generate(&mut OsRng);
    identity.save(&path)?;

    println!("wrote key to {}", path.display());
    println!("public key: {}", hex::encode(identity.public_key()));

    Ok(())
}

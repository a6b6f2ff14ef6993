mod config;
mod output;
mod select;

use crate::config::{Config, OutputFormat};
use crate::select::Selector;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use vmdeck_core::{collect_discovery, spawn_discovery, Dispatcher, ScanOptions, VmAction, VmRecord};

#[derive(Debug, Parser)]
#[command(
    name = "vmdeck",
    about = "vmdeck: encontra VMs VMware/VirtualBox em disco e envia start/stop"
)]
struct Args {
    /// Arquivo de configuração (padrão: <config_dir>/vmdeck/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log em nível debug (padrão: info)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Procura VMs recursivamente em um diretório
    Find {
        /// Diretório raiz (padrão: default_directory da configuração, ou ".")
        dir: Option<PathBuf>,

        /// Saída em JSON
        #[arg(long)]
        json: bool,

        /// Segue links simbólicos durante a varredura
        #[arg(long)]
        follow_links: bool,
    },

    /// Inicia uma VM
    Start(Target),

    /// Para uma VM
    Stop(Target),

    /// Lista os backends e extensões reconhecidas
    Backends,
}

#[derive(Debug, clap::Args)]
struct Target {
    /// Caminho do arquivo .vmx / .vbox
    #[arg(required_unless_present_any = ["name", "index"])]
    path: Option<PathBuf>,

    /// Diretório varrido para escolher a VM por --name/--index
    #[arg(long, conflicts_with = "path")]
    dir: Option<PathBuf>,

    /// Nome da VM na lista do `find`
    #[arg(long, conflicts_with_all = ["path", "index"])]
    name: Option<String>,

    /// Posição da VM na lista do `find` (começa em 1)
    #[arg(long, conflicts_with = "path")]
    index: Option<usize>,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        _ => Level::DEBUG,
    }
}

fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_max_level(log_level(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Descoberta em background; o main só drena o canal. Falha na varredura
/// vira aviso no log e lista vazia.
fn find_vms(root: PathBuf, options: ScanOptions) -> Vec<VmRecord> {
    match collect_discovery(spawn_discovery(root, options)) {
        Ok(records) => records,
        Err(err) => {
            tracing::warn!("{err}");
            Vec::new()
        }
    }
}

fn run_find(config: &Config, dir: Option<PathBuf>, json: bool, follow_links: bool) -> anyhow::Result<()> {
    let root = config.directory(dir);
    let mut options = config.scan_options();
    options.follow_links |= follow_links;

    let records = find_vms(root.clone(), options);

    if json || config.output == OutputFormat::Json {
        println!("{}", output::render_json(&records)?);
    } else {
        print!("{}", output::render_table(&root, &records));
    }
    Ok(())
}

fn run_command(config: &Config, action: VmAction, target: Target) -> anyhow::Result<()> {
    let path = match (target.path, target.name, target.index) {
        (Some(path), _, _) => path,
        (None, Some(name), _) => {
            let dir = config.directory(target.dir);
            select::resolve_in_directory(&dir, &Selector::Name(name), &config.scan_options())?
        }
        (None, None, Some(index)) => {
            let dir = config.directory(target.dir);
            select::resolve_in_directory(&dir, &Selector::Index(index), &config.scan_options())?
        }
        (None, None, None) => anyhow::bail!("Use <PATH>, --name <nome> ou --index <n>"),
    };

    let dispatcher = Dispatcher::new();
    let outcome = match action {
        VmAction::Start => dispatcher.start_path(&path),
        VmAction::Stop => dispatcher.stop_path(&path),
    };

    match outcome {
        Some(outcome) if outcome.success => {
            print!("{}", output::render_outcome(&outcome));
            Ok(())
        }
        Some(outcome) => anyhow::bail!(outcome.message),
        None => {
            // Extensão desconhecida: nada é feito
            println!(
                "⚠️  Nenhum backend reconhece '{}', nada a fazer",
                path.display()
            );
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Config::resolve(args.config.as_deref())?;

    match args.command {
        Command::Find {
            dir,
            json,
            follow_links,
        } => run_find(&config, dir, json, follow_links),
        Command::Start(target) => run_command(&config, VmAction::Start, target),
        Command::Stop(target) => run_command(&config, VmAction::Stop, target),
        Command::Backends => {
            print!("{}", output::render_backends());
            Ok(())
        }
    }
}

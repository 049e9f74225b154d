use std::net::IpAddr;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use server_api::{load_system_view, ApiContext};
use shared::domain::{AddressConfig, MacAddress, RuleAction, RuleSource, SystemName, Transport};
use storage::{NewAddress, NewFirewallRule, NewSystem, Storage};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://./data/inventory.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    CreateSystem {
        name: String,
        #[arg(long)]
        owner: String,
        #[arg(long)]
        os_name: String,
        #[arg(long)]
        os_family: String,
        #[arg(long)]
        comment: Option<String>,
    },
    AddInterface {
        system: String,
        mac: String,
        #[arg(long)]
        comment: Option<String>,
    },
    AddAddress {
        mac: String,
        address: IpAddr,
        #[arg(long, default_value = "static")]
        config: String,
        #[arg(long)]
        primary: bool,
        #[arg(long)]
        comment: Option<String>,
    },
    AddRule {
        address: IpAddr,
        source: String,
        #[arg(long, default_value = "allow")]
        action: String,
        #[arg(long, default_value = "tcp")]
        transport: String,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        program: Option<String>,
        #[arg(long)]
        comment: Option<String>,
    },
    DeleteSystem {
        name: String,
    },
    Show {
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;

    match cli.command {
        Command::CreateSystem {
            name,
            owner,
            os_name,
            os_family,
            comment,
        } => {
            let system_name = SystemName::parse(&name)?;
            storage
                .create_system(&NewSystem {
                    system_name: system_name.clone(),
                    owner,
                    os_name,
                    os_family,
                    comment,
                })
                .await?;
            println!("created system {system_name}");
        }
        Command::AddInterface {
            system,
            mac,
            comment,
        } => {
            let system_name = SystemName::parse(&system)?;
            let mac = MacAddress::parse(&mac)?;
            storage
                .create_interface(&system_name, &mac, comment.as_deref())
                .await?;
            println!("attached interface {mac} to {system_name}");
        }
        Command::AddAddress {
            mac,
            address,
            config,
            primary,
            comment,
        } => {
            let mac = MacAddress::parse(&mac)?;
            storage
                .create_address(&NewAddress {
                    address,
                    mac: mac.clone(),
                    config: AddressConfig::parse(&config)?,
                    is_primary: primary,
                    comment,
                })
                .await?;
            println!("bound {address} to interface {mac}");
        }
        Command::AddRule {
            address,
            source,
            action,
            transport,
            port,
            program,
            comment,
        } => {
            let source = RuleSource::from(source.trim());
            if let RuleSource::Other(tag) = &source {
                eprintln!("warning: source '{tag}' is not shown on the system page");
            }
            let rule_id = storage
                .create_firewall_rule(&NewFirewallRule {
                    address,
                    source,
                    action: RuleAction::parse(&action)?,
                    transport: Transport::parse(&transport)?,
                    port,
                    program,
                    comment,
                })
                .await?;
            println!("created rule_id={rule_id} for {address}");
        }
        Command::DeleteSystem { name } => {
            let system_name = SystemName::parse(&name)?;
            if storage.delete_system(&system_name).await? {
                println!("deleted system {system_name}");
            } else {
                println!("no system named {system_name}");
            }
        }
        Command::Show { name } => {
            let system_name = SystemName::parse(&name)?;
            let ctx = ApiContext::new(storage);
            let view = load_system_view(&ctx, &system_name)
                .await
                .map_err(|e| anyhow!("{}: {}", e.code, e.message))?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    Ok(())
}

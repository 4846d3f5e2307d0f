use anyhow::Result;
use azure_cli::AzureCli;
use common::{command::GREEN_TICK, config::load_config, exit, provider::ScaleSetClient};
use tracing::info;

use crate::{
    args::Cli,
    synthesis::{synthesize, Added},
};

#[derive(Debug, Clone)]
pub struct Request<'a> {
    pub resource_group: &'a str,
    pub secondary_config_count: u32,
    pub scale_set: Option<&'a str>,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct Report {
    pub scale_set: String,
    /// Every configuration appended, carried ones included.
    pub added: Vec<Added>,
    /// Whether the profile was written back and rolled out.
    pub applied: bool,
}

impl Report {
    /// Lines printed once the run is over.
    pub fn summary(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .added
            .iter()
            .map(|a| {
                let tick = GREEN_TICK.to_string();
                let mut line = format!("{tick} {} added to {}", a.name, a.interface);
                if a.is_carried() {
                    line.push_str(&format!(" (cloned from {})", a.source));
                }
                line
            })
            .collect();

        if self.applied {
            let carried = self.added.iter().filter(|a| a.is_carried()).count();
            lines.push(format!(
                "{} {} secondary ip configurations provisioned on {} ({} carried over)",
                GREEN_TICK.to_string(),
                self.added.len(),
                self.scale_set,
                carried
            ));
        } else {
            lines.push(format!("Dry run, {} left unchanged", self.scale_set));
        }
        lines
    }
}

/// Discovers the scale set, adds secondary IP configurations to its network
/// profile, writes the profile back and updates every instance.
///
/// Stops at the first failing call. A failed instance update does not undo
/// the profile update before it.
pub async fn provision(client: &dyn ScaleSetClient, req: &Request<'_>) -> Result<Report> {
    let name = match req.scale_set {
        Some(n) => n.to_owned(),
        None => {
            let names = client.list_scale_sets(req.resource_group).await?;
            info!("scale sets in {}: {names:?}", req.resource_group);
            match names.into_iter().next() {
                Some(n) => n,
                None => exit!(
                    format!("no scale sets found in resource group {}", req.resource_group),
                    "Nothing to provision"
                ),
            }
        }
    };

    let mut vmss = client.show_scale_set(req.resource_group, &name).await?;
    let network_profile = &mut vmss.virtual_machine_profile.network_profile;
    let added = synthesize(network_profile, req.secondary_config_count);
    info!("{} ip configurations to add to {name}", added.len());

    if req.dry_run {
        println!("{}", serde_json::to_string_pretty(&*network_profile)?);
        return Ok(Report {
            scale_set: name,
            added,
            applied: false,
        });
    }

    client
        .update_network_profile(req.resource_group, &name, network_profile)
        .await?;
    client.update_instances(req.resource_group, &name).await?;

    Ok(Report {
        scale_set: name,
        added,
        applied: true,
    })
}

pub async fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.file.as_deref())?;
    let client = AzureCli::new(&config.azure, cli.verbose);
    info!("using {}", client.name());

    let req = Request {
        resource_group: &cli.resource_group,
        secondary_config_count: cli.secondary_config_count,
        scale_set: cli.scale_set.as_deref(),
        dry_run: cli.dry_run,
    };
    let report = provision(&client, &req).await?;

    for line in report.summary() {
        println!("{line}");
    }
    Ok(())
}

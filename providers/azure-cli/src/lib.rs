use anyhow::{Context, Result};
use common::{
    command::{command, command_line},
    config::AzureArgs,
    exit,
    model::{NetworkProfile, ScaleSet},
    provider::*,
};

pub const UPDATE_LABEL: &str = "Command to update VMSS";
pub const UPDATE_INSTANCES_LABEL: &str = "Command to update VMSS instances";

/// [`ScaleSetClient`] backed by the `az` command line tool.
pub struct AzureCli {
    cli: String,
    subscription: Option<String>,
    verbose: bool,
}

impl AzureCli {
    pub fn new(args: &AzureArgs, verbose: bool) -> Self {
        Self {
            cli: args.cli.clone(),
            subscription: args.subscription.clone(),
            verbose,
        }
    }

    fn vmss_args(&self, subcommand: &str, resource_group: &str, rest: &[&str]) -> Vec<String> {
        let mut args: Vec<String> = ["vmss", subcommand, "--resource-group", resource_group]
            .iter()
            .chain(rest)
            .map(|s| s.to_string())
            .collect();
        if let Some(subscription) = &self.subscription {
            args.push("--subscription".to_owned());
            args.push(subscription.to_owned());
        }
        args
    }

    pub fn list_args(&self, resource_group: &str) -> Vec<String> {
        self.vmss_args("list", resource_group, &["--query", "[].name", "--output", "json"])
    }

    pub fn show_args(&self, resource_group: &str, name: &str) -> Vec<String> {
        self.vmss_args("show", resource_group, &["--name", name, "--output", "json"])
    }

    pub fn update_args(
        &self,
        resource_group: &str,
        name: &str,
        network_profile: &NetworkProfile,
    ) -> Result<Vec<String>> {
        let profile = serde_json::to_string(network_profile)?;
        Ok(self.vmss_args(
            "update",
            resource_group,
            &[
                "--name",
                name,
                "--set",
                &format!("virtualMachineProfile.networkProfile={profile}"),
                "--output",
                "none",
            ],
        ))
    }

    pub fn update_instances_args(&self, resource_group: &str, name: &str) -> Vec<String> {
        self.vmss_args(
            "update-instances",
            resource_group,
            &["--name", name, "--instance-ids", "*", "--output", "none"],
        )
    }

    /// Line printed before an update call runs.
    pub fn announcement(&self, label: &str, args: &[String]) -> String {
        format!("{label}: {}", command_line(&self.cli, args))
    }

    async fn run_printed(&self, label: &str, args: &[String], msgs: [&str; 3]) -> Result<String> {
        println!("{}", self.announcement(label, args));
        command(&self.cli, args, self.verbose, msgs).await
    }
}

#[async_trait::async_trait]
impl ScaleSetClient for AzureCli {
    async fn list_scale_sets(&self, resource_group: &str) -> Result<Vec<String>> {
        let args = self.list_args(resource_group);
        let out = command(&self.cli, &args, self.verbose, DISCOVER).await?;
        let names: Vec<String> = match serde_json::from_str(&out) {
            Ok(n) => n,
            Err(err) => exit!(err, "Unexpected scale set list output: {}", out.trim()),
        };
        Ok(names)
    }

    async fn show_scale_set(&self, resource_group: &str, name: &str) -> Result<ScaleSet> {
        let args = self.show_args(resource_group, name);
        let out = command(&self.cli, &args, self.verbose, FETCH).await?;
        serde_json::from_str(&out).with_context(|| format!("Could not decode scale set {name}"))
    }

    async fn update_network_profile(
        &self,
        resource_group: &str,
        name: &str,
        network_profile: &NetworkProfile,
    ) -> Result<()> {
        let args = self.update_args(resource_group, name, network_profile)?;
        self.run_printed(UPDATE_LABEL, &args, UPDATE).await?;
        Ok(())
    }

    async fn update_instances(&self, resource_group: &str, name: &str) -> Result<()> {
        let args = self.update_instances_args(resource_group, name);
        self.run_printed(UPDATE_INSTANCES_LABEL, &args, PROPAGATE).await?;
        Ok(())
    }

    fn name(&self) -> String {
        "azure-cli".to_owned()
    }
}

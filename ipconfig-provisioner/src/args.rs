use clap::{builder::NonEmptyStringValueParser, ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(name = "vmss-ipconfig")]
#[command(author, version, about = "Adds secondary IP configurations to a virtual machine scale set", long_about = None)]
pub struct Cli {
    /// Verbose logging
    #[arg(long, short, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Configuration file
    #[arg(long, short)]
    pub file: Option<String>,

    /// Resource group holding the scale set
    #[arg(long, short = 'g', value_parser = NonEmptyStringValueParser::new())]
    pub resource_group: String,

    /// Number of secondary IP configurations to add to each network interface
    #[arg(long)]
    pub secondary_config_count: u32,

    /// Scale set to update, the first one in the resource group when omitted
    #[arg(long, short = 'n', value_parser = NonEmptyStringValueParser::new())]
    pub scale_set: Option<String>,

    /// Print the resulting network profile without writing it back
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,
}

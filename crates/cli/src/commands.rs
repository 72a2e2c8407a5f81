use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Compile one filter into a SQL fragment
    Compile {
        #[command(flatten)]
        target: FilterArgs,

        #[arg(long = "value", help = "Filter value; repeat for a set of values")]
        values: Vec<String>,

        #[arg(long, help = "Treat a single --value as a one-element set")]
        set: bool,

        #[arg(long, help = "Compile the negated filter")]
        negate: bool,

        #[arg(
            long,
            default_value = "",
            help = "Comparison rendered against the bare field name, e.g. \"`color` = 'red'\""
        )]
        query: String,
    },
    /// Show which compilation strategy a filter resolves to
    Explain {
        #[command(flatten)]
        target: FilterArgs,
    },
}

#[derive(Args)]
pub struct FilterArgs {
    #[arg(long, help = "Catalog JSON file path")]
    pub catalog: String,

    #[arg(long, help = "Attribute code or reserved field name")]
    pub field: String,

    /// Filter type: "term" or "range"
    #[arg(long = "type", default_value = "term")]
    pub filter_type: String,

    /// SQL dialect: "mysql" or "postgres"
    #[arg(long, default_value = "mysql")]
    pub dialect: String,

    #[arg(long, help = "Optional KEY=VALUE file with FILTERC_* overrides")]
    pub env_file: Option<String>,
}

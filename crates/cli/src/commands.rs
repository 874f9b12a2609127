use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Print the token stream of a script
    Tokens {
        #[arg(long, help = "SQL script path")]
        file: String,
    },
    /// Print the parsed definitions as JSON
    Parse {
        #[arg(long, help = "SQL script path")]
        file: String,

        #[arg(
            long,
            help = "If specified, writes the JSON to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Report whether a script parses
    Check {
        #[arg(long, help = "SQL script path")]
        file: String,
    },
    /// Print the canonical SQL of every statement
    Render {
        #[arg(long, help = "SQL script path")]
        file: String,
    },
    /// Create the tables of a script on a PostgreSQL server
    Apply {
        #[arg(long, help = "SQL script path")]
        file: String,

        /// Connection string; falls back to PGDDL_DATABASE_URL
        #[arg(long)]
        conn_str: Option<String>,
    },
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};

use crate::application::{LedgerService, SubmitInput};
use crate::domain::{format_cents, Category, Transaction, TxId, TxKind};
use crate::io::Exporter;

/// Saldo - Income/Expense Ledger
#[derive(Parser)]
#[command(name = "saldo")]
#[command(about = "A local-first income/expense ledger for the command line")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "saldo.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new ledger database
    Init,

    /// Record a new transaction
    Add {
        /// Entry kind: income or expense
        kind: String,

        /// Amount (e.g., "50.00" or "50")
        amount: String,

        /// Description of the entry
        description: String,

        /// Category (salary, groceries, dining, transport, utilities,
        /// entertainment, health, other)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Edit an existing transaction; omitted fields keep their value
    Edit {
        /// Transaction id
        id: TxId,

        /// New kind: income or expense
        #[arg(long)]
        kind: Option<String>,

        /// New amount
        #[arg(long)]
        amount: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New category
        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction id
        id: TxId,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// List all transactions in insertion order
    List,

    /// Show the current balance
    Balance,

    /// Export the ledger to CSV or JSON
    Export {
        /// Format: csv, json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Ledger initialized: {}", self.database);
            }

            Commands::Add {
                kind,
                amount,
                description,
                category,
            } => {
                let mut service = LedgerService::open(&self.database).await?;
                let kind = parse_kind(&kind)?;
                let category = category.as_deref().map(parse_category).transpose()?;

                let tx = service
                    .submit(SubmitInput {
                        kind,
                        amount_text: amount,
                        description,
                        category,
                    })
                    .await?;

                println!("Added #{}: {}", tx.id, describe(&tx));
                println!("Balance: {}", format_cents(service.compute_balance()));
            }

            Commands::Edit {
                id,
                kind,
                amount,
                description,
                category,
            } => {
                let mut service = LedgerService::open(&self.database).await?;

                // Pre-fill from the current values, then apply overrides
                let current = service.request_edit(id)?;
                let kind = match kind {
                    Some(k) => parse_kind(&k)?,
                    None => current.kind,
                };
                let amount = amount.unwrap_or_else(|| format_cents(current.amount));
                let description = description.unwrap_or_else(|| current.description.clone());
                let category = match category {
                    Some(c) => Some(parse_category(&c)?),
                    None => current.category,
                };

                let tx = service
                    .submit(SubmitInput {
                        kind,
                        amount_text: amount,
                        description,
                        category,
                    })
                    .await?;

                println!("Updated #{}: {}", tx.id, describe(&tx));
                println!("Balance: {}", format_cents(service.compute_balance()));
            }

            Commands::Delete { id, yes } => {
                let mut service = LedgerService::open(&self.database).await?;

                if !yes && !confirm(&format!("Delete transaction #{}?", id))? {
                    println!("Aborted.");
                    return Ok(());
                }

                service.request_delete(id).await?;
                println!("Deleted #{}", id);
                println!("Balance: {}", format_cents(service.compute_balance()));
            }

            Commands::List => {
                let service = LedgerService::open(&self.database).await?;
                let transactions = service.transactions();

                if transactions.is_empty() {
                    println!("No transactions recorded.");
                } else {
                    println!(
                        "{:<6} {:<8} {:>12}  {:<24} {:<14}",
                        "ID", "KIND", "AMOUNT", "DESCRIPTION", "CATEGORY"
                    );
                    println!("{}", "-".repeat(68));
                    for tx in transactions {
                        println!(
                            "{:<6} {:<8} {:>12}  {:<24} {:<14}",
                            tx.id,
                            tx.kind,
                            signed_amount(tx),
                            tx.description,
                            tx.category.map(|c| c.as_str()).unwrap_or("-"),
                        );
                    }
                    println!("{}", "-".repeat(68));
                    println!("Balance: {}", format_cents(service.compute_balance()));
                }
            }

            Commands::Balance => {
                let service = LedgerService::open(&self.database).await?;
                println!("{}", format_cents(service.compute_balance()));
            }

            Commands::Export { format, output } => {
                let service = LedgerService::open(&self.database).await?;
                let exporter = Exporter::new(&service);

                let count = match output {
                    Some(path) => {
                        let file = File::create(&path)
                            .with_context(|| format!("Failed to create {}", path))?;
                        write_export(&exporter, &format, file)?
                    }
                    None => write_export(&exporter, &format, io::stdout())?,
                };

                eprintln!("Exported {} transaction(s)", count);
            }
        }

        Ok(())
    }
}

fn write_export<W: Write>(exporter: &Exporter, format: &str, writer: W) -> Result<usize> {
    match format {
        "csv" => exporter.export_csv(writer),
        "json" => exporter.export_json(writer),
        other => anyhow::bail!("Unknown export format '{}'. Use csv or json", other),
    }
}

fn parse_kind(s: &str) -> Result<TxKind> {
    TxKind::from_str(s).with_context(|| format!("Invalid kind '{}'. Use income or expense", s))
}

fn parse_category(s: &str) -> Result<Category> {
    Category::from_str(s).with_context(|| {
        let valid: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        format!("Invalid category '{}'. Valid: {}", s, valid.join(", "))
    })
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn signed_amount(tx: &Transaction) -> String {
    let sign = match tx.kind {
        TxKind::Income => "+",
        TxKind::Expense => "-",
    };
    format!("{}{}", sign, format_cents(tx.amount))
}

fn describe(tx: &Transaction) -> String {
    match tx.category {
        Some(category) => format!(
            "{} {} ({})",
            tx.description,
            signed_amount(tx),
            category
        ),
        None => format!("{} {}", tx.description, signed_amount(tx)),
    }
}

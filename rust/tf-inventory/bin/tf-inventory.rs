//! Reads the outputs of the Terraform deployment under `./terraform` and writes the matching
//! Ansible inventory to `./ansible/inventory.ini`, ready for `ansible-playbook -i`.
use anyhow::Context;
use clap::Parser;
use tf_inventory::cli::Args;
use tf_inventory::errors::InventoryError;

fn main() {
    env_logger::init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        match e.downcast_ref::<InventoryError>() {
            Some(err) if err.is_upstream() => {
                eprintln!("❌ Failed to fetch Terraform output: {:#}", e);
                std::process::exit(err.exit_code());
            }
            Some(err) => {
                eprintln!("❌ {:#}", e);
                std::process::exit(err.exit_code());
            }
            None => {
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("reading the current directory")?;
    let paths = args.paths(&cwd);
    let source = args.output_source(&cwd);

    if args.stdout {
        let inventory = tf_inventory::generate(source.as_ref())?;
        print!("{}", inventory);
        return Ok(());
    }

    paths.ensure_inventory_dir()?;

    println!("🔍 Fetching Terraform outputs...");
    log::debug!("Using {}", source.describe());
    let inventory = tf_inventory::generate(source.as_ref())?;
    inventory.write_to_file(&paths.inventory_file)?;

    println!(
        "✅ Inventory file generated successfully at: {}",
        paths.inventory_file.display()
    );
    Ok(())
}

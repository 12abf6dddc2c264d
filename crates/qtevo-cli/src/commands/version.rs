//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - variational quantum time evolution",
        style("qtevo").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qtevo-varqte  McLachlan real/imaginary time evolution");
    println!("  qtevo-ising   Stable-set Ising encoding and Gset reader");
    println!("  qtevo-cli     Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}

use anyhow::Result;
use colored::Colorize;

pub fn main() -> Result<()> {
    println!("{}", "built-in systems:".cyan().bold());
    println!("  {:<10} 1D logistic map x -> 4x(1-x), max exponent ln 2", "logistic");
    println!("  {:<10} 2D linear map with Jacobian diag(2, 0.5)", "linear2d");
    println!("  {:<10} 2D Henon map (a = 1.4, b = 0.3), max exponent ~0.42", "henon");
    println!("  {:<10} 3D Lorenz flow (classic parameters), max exponent ~0.91", "lorenz");
    Ok(())
}

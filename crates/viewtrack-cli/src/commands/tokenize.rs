//! Tokenize command implementation.

use super::SaltSource;

pub fn run(input: String, source: &SaltSource) -> Result<(), Box<dyn std::error::Error>> {
    let tokenizer = source.tokenizer()?;
    println!("{}", tokenizer.tokenize(&input));
    Ok(())
}

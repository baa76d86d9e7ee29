use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sha_forge::attack::sha1_extend;
use sha_forge::crypto::sha1::sha1;
use sha_forge::encoding::{Decodable, Encodable};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash a message with SHA-1 and print the digest as lowercase hex
    Hash {
        /// message to hash
        #[arg(short, long)]
        input: Option<String>,

        /// the file to read the message from, raw bytes
        ///
        /// the program will read from stdin if neither input-file or input are set
        #[arg(long, conflicts_with = "input")]
        input_file: Option<PathBuf>,
    },

    /// Forge a digest for secret || known || padding || extension without the secret
    Extend {
        /// hex encoded digest of secret || known
        #[arg(short, long)]
        digest: String,

        /// the data known to have been hashed after the secret
        #[arg(short, long, default_value_t = String::new())]
        known: String,

        /// the data to append
        #[arg(short, long)]
        extension: String,

        /// length of the unknown secret prefix in bytes
        #[arg(short, long)]
        secret_len: usize,
    },
}

fn main() -> Result<()> {
    let args = Args::try_parse()?;

    match args.command {
        Command::Hash { input, input_file } => {
            let message = if let Some(input_str) = input {
                input_str.into_bytes()
            } else if let Some(ref input_file) = input_file {
                fs::read(input_file)
                    .with_context(|| format!("Reading from {input_file:?} to get input data."))?
            } else {
                let mut data = vec![];
                io::stdin().read_to_end(&mut data)?;
                data
            };

            println!("{}", sha1(message).encode_hex());
        }

        Command::Extend {
            digest,
            known,
            extension,
            secret_len,
        } => {
            let digest = digest
                .decode_hex()
                .context("Decoding the hex digest of secret || known.")?;

            let (forged_digest, forged_message) =
                sha1_extend(&digest, known.as_bytes(), extension.as_bytes(), secret_len)?;

            println!("forged digest:  {}", forged_digest.encode_hex());
            println!("forged message: {}", forged_message.encode_hex());
        }
    }

    Ok(())
}

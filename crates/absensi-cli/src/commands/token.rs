use anyhow::Result;
use clap::Args;

use absensi_core::model::{Gender, Identity};
use absensi_protocol::TokenPayload;

#[derive(Args)]
pub struct TokenArgs {
    /// Student name
    #[arg(long)]
    pub name: String,

    /// Class name (e.g. 10A)
    #[arg(long)]
    pub class: String,

    /// putra or putri
    #[arg(long)]
    pub gender: Gender,
}

pub fn run(args: &TokenArgs) -> Result<()> {
    let payload = TokenPayload::from(Identity {
        name: args.name.clone(),
        class: args.class.clone(),
        gender: args.gender,
    });
    println!("{}", payload.encode());
    Ok(())
}

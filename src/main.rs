//! Thin CLI shell over the client core: request orchestration, local
//! filtering, and the confirmation prompt for deletes. No business logic.

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;

use paperstack::{
    client::DocumentClient, config::ClientConfig, delete::delete_document, filter,
    models::FilterCriteria, multipart::UploadPayload, store::DocumentStore, ClientError,
    DocumentApi,
};

const USAGE: &str = "usage: paperstack <command>

commands:
  list [--query Q] [--category C] [--type T] [--from YYYY-MM-DD] [--to YYYY-MM-DD]
  upload <path>
  open <id>
  delete <id>";

#[tokio::main]
async fn main() {
    paperstack::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let client = DocumentClient::new(&ClientConfig::from_env());

    let result = match args.first().map(String::as_str) {
        Some("list") => list(&client, &args[1..]).await,
        Some("upload") => upload(&client, &args[1..]).await,
        Some("open") => open(&client, &args[1..]).await,
        Some("delete") => delete(&client, &args[1..]).await,
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn list(client: &DocumentClient, args: &[String]) -> Result<(), ClientError> {
    let criteria = parse_criteria(args)?;

    let store = DocumentStore::new();
    store.refresh(client).await?;
    let all = store.current()?;
    let shown = filter::apply(&all, &criteria);

    for doc in &shown {
        let date = doc
            .representative_date()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{}  {}  [{} / {}]  {}",
            doc.id,
            doc.file_name,
            doc.category.as_deref().unwrap_or("-"),
            doc.doc_type.as_deref().unwrap_or("-"),
            date,
        );
    }
    println!(
        "{} of {} documents | categories: {} | types: {}",
        shown.len(),
        all.len(),
        filter::categories(&all).join(", "),
        filter::doc_types(&all).join(", "),
    );
    Ok(())
}

async fn upload(client: &DocumentClient, args: &[String]) -> Result<(), ClientError> {
    let path = args.first().ok_or_else(|| usage_err("upload <path>"))?;
    let payload = UploadPayload::from_path(Path::new(path))?;
    let ack = client.upload(payload).await?;
    println!(
        "uploaded {}",
        ack.file_name.or(ack.id).unwrap_or_else(|| path.clone())
    );
    Ok(())
}

async fn open(client: &DocumentClient, args: &[String]) -> Result<(), ClientError> {
    let id = args.first().ok_or_else(|| usage_err("open <id>"))?;
    let url = client.signed_url(id).await?;
    println!("{url}");
    Ok(())
}

async fn delete(client: &DocumentClient, args: &[String]) -> Result<(), ClientError> {
    let id = args.first().ok_or_else(|| usage_err("delete <id>"))?;

    print!("Delete document {id}? [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    if !answer.trim().eq_ignore_ascii_case("y") {
        println!("cancelled");
        return Ok(());
    }

    let store = DocumentStore::new();
    let outcome = delete_document(client, &store, id).await?;
    if outcome.confirmation_required {
        println!("deleted {id} (server required confirmation)");
    } else {
        println!("deleted {id}");
    }
    Ok(())
}

fn parse_criteria(args: &[String]) -> Result<FilterCriteria, ClientError> {
    let mut criteria = FilterCriteria::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| usage_err(&format!("{flag} needs a value")))?;
        match flag.as_str() {
            "--query" => criteria.query = value.clone(),
            "--category" => criteria.category = value.clone(),
            "--type" => criteria.doc_type = value.clone(),
            "--from" => criteria.date_from = Some(parse_date(value)?),
            "--to" => criteria.date_to = Some(parse_date(value)?),
            other => return Err(usage_err(&format!("unknown flag {other}"))),
        }
    }
    Ok(criteria)
}

fn parse_date(raw: &str) -> Result<NaiveDate, ClientError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| usage_err(&format!("expected YYYY-MM-DD, got {raw}")))
}

fn usage_err(detail: &str) -> ClientError {
    ClientError::Io(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        detail.to_string(),
    ))
}

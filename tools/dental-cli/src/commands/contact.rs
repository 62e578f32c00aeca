//! Contact form command.

use anyhow::{bail, Context as _, Result};
use dental_data::{ContactRequest, FetchError};
use dialoguer::{Confirm, Editor, Input};

use super::{ContactArgs, ContactCommand};
use crate::context::Context;

/// Run the contact command.
pub async fn run(args: ContactArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ContactCommand::Send {
            name,
            email,
            subject,
            message,
            yes,
        } => {
            let interactive = !ctx.output.is_json();
            let request = ContactRequest::new(
                field("Name", name, interactive)?,
                field("Email", email, interactive)?,
                field("Subject", subject, interactive)?,
                message_field(message, interactive)?,
            );
            send(ctx, request, yes).await
        }
    }
}

/// Use the flag value, or prompt for it when interactive.
fn field(label: &str, value: Option<String>, interactive: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None if interactive => Ok(Input::<String>::new().with_prompt(label).interact_text()?),
        None => bail!("--{} is required", label.to_lowercase()),
    }
}

fn message_field(value: Option<String>, interactive: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None if interactive => Ok(Editor::new().edit("")?.unwrap_or_default()),
        None => bail!("--message is required"),
    }
}

async fn send(ctx: &Context, request: ContactRequest, yes: bool) -> Result<()> {
    // surface form problems before asking for confirmation
    if let Err(FetchError::Validation(problem)) = request.validate() {
        bail!("{}", problem);
    }

    if !yes && !ctx.output.is_json() {
        ctx.output.kv("from", &format!("{} <{}>", request.name.trim(), request.email.trim()));
        ctx.output.kv("subject", request.subject.trim());
        let confirmed = Confirm::new()
            .with_prompt("Send this message?")
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.info("Message not sent.");
            return Ok(());
        }
    }

    let client = ctx.contact_client()?;
    let spinner = ctx.output.spinner("Sending message...");
    let response = client.send_contact_email(&request).await;
    spinner.finish_and_clear();
    let response = response.context("Failed to send message")?;

    if ctx.output.is_json() {
        ctx.output.json(&response);
        return Ok(());
    }

    if response.success {
        let message = if response.message.is_empty() {
            "Message sent"
        } else {
            response.message.as_str()
        };
        ctx.output.success(message);
        Ok(())
    } else {
        bail!("The contact service rejected the message: {}", response.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_without_prompt() {
        assert_eq!(field("Name", Some("Dr. Patel".into()), false).unwrap(), "Dr. Patel");
        let err = field("Email", None, false).unwrap_err();
        assert_eq!(err.to_string(), "--email is required");
        assert!(message_field(None, false).is_err());
    }
}

//! Notification sending handler

use super::super::{CliContext, SendArgs};
use anyhow::Result;
use apprise_dispatch::dispatch::{Dispatcher, NotificationRequest};
use apprise_dispatch::options::{OptionSchema, OptionSet, OptionValue};

/// Handler for the `send` command
pub struct SendHandler<'a> {
    context: &'a CliContext,
}

impl<'a> SendHandler<'a> {
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    /// Turn parsed arguments into a request.
    ///
    /// Repeating a list option (`-o tag=ops -o tag=alerts`) collects every
    /// value; for any other option the last occurrence wins.
    pub fn build_request(args: &SendArgs) -> NotificationRequest {
        let mut options = OptionSet::new();
        for (name, raw) in &args.options {
            let value = OptionValue::parse_cli(name, raw);
            let accumulates = OptionSchema::lookup(name)
                .is_some_and(|spec| spec.rule.accepts_list());
            let value = match options.get(name) {
                Some(existing) if accumulates => existing.clone().appended(value),
                _ => value,
            };
            options.insert(name.clone(), value);
        }

        let mut request = NotificationRequest::new(args.urls.iter().cloned(), args.body.clone())
            .with_options(options);
        if let Some(title) = &args.title {
            request = request.with_title(title.clone());
        }
        request
    }

    pub async fn handle_send(&self, args: SendArgs) -> Result<()> {
        let dispatcher = Dispatcher::new(self.context.dispatcher_config());
        let request = Self::build_request(&args);

        if args.print {
            let command = dispatcher.prepare(&request)?;
            println!("{}", command);
            return Ok(());
        }

        let result = dispatcher.dispatch(&request).await?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            for line in &result.output {
                println!("{line}");
            }
        }

        Ok(())
    }
}

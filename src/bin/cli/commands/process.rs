use anyhow::Context;
use mq_debug::commands::{process, CommandStatus, ProcessOptions};
use mq_debug::config::MqDebugConfig;
use mq_debug::consumption::ConsumerState;
use mq_debug::registry::StaticDestinationRegistry;
use mq_debug::transport::DbalQueueConsumer;

pub async fn handle_process_command(
    queue: Option<String>,
    processor: Option<String>,
    message_limit: i64,
    time_limit: Option<String>,
    config: &MqDebugConfig,
) -> anyhow::Result<CommandStatus> {
    let registry = StaticDestinationRegistry::from_config(config);
    let mut consumer = DbalQueueConsumer::connect_lazy(config)
        .context("invalid transport database settings")?;
    let state = ConsumerState::new();

    let options = ProcessOptions {
        queue,
        processor,
        message_limit,
        time_limit,
    };

    let mut stdout = std::io::stdout();
    let status = process::execute(&registry, &mut consumer, &state, &options, &mut stdout).await?;
    Ok(status)
}

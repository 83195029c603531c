use mq_debug::commands::{list, CommandStatus, ListOptions};
use mq_debug::config::MqDebugConfig;
use mq_debug::database::{DatabaseConnection, PgQueueStorage, QueueStorageReader, UnavailableStorage};
use mq_debug::registry::StaticDestinationRegistry;
use tracing::debug;

pub async fn handle_list_command(
    queue: Option<String>,
    json: bool,
    config: &MqDebugConfig,
) -> anyhow::Result<CommandStatus> {
    let registry = StaticDestinationRegistry::from_config(config);

    let connection = DatabaseConnection::connect_lazy(&config.database);
    let storage: Box<dyn QueueStorageReader> = match &connection {
        Ok(connection) => Box::new(PgQueueStorage::new(
            connection.clone(),
            config.transport.table_name.clone(),
        )),
        Err(e) => {
            debug!(error = %e, "Database unavailable - message counts will read as zero");
            Box::new(UnavailableStorage::new(e.to_string()))
        }
    };

    let options = ListOptions {
        queue_filter: queue,
        json,
    };
    let mut stdout = std::io::stdout();
    let status = list::execute(&registry, storage.as_ref(), &options, &mut stdout).await?;

    if let Ok(connection) = connection {
        connection.close().await;
    }
    Ok(status)
}

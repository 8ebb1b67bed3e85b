pub mod commands;
pub mod events;
pub mod render;
pub mod state;

use duihua_types::{Action, AppEvent};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::commands::{Command, HELP, parse_command};
use crate::events::{handle_events, redraw};
use crate::state::UiState;

/// Terminal front end over stdin/stdout
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    run_terminal(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        app_to_ui_rx,
        ui_to_app_tx,
        cancel,
    )
    .await
}

/// Drive the UI over any line reader and writer.
///
/// Returns when the app side hangs up, the token is cancelled, or input
/// ends. End of input is treated as a quit request.
pub async fn run_terminal<R, W>(
    input: R,
    mut output: W,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut state = UiState::new();
    let mut lines = input.lines();
    let mut input_open = true;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("[UI] Cancelled");
                break;
            }
            event = app_to_ui_rx.recv() => {
                let Ok(event) = event else {
                    tracing::debug!("[UI] App channel closed");
                    break;
                };
                if let Some(text) = handle_events(event, &mut state) {
                    write_out(&mut output, &text).await?;
                }
            }
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    tracing::debug!("[UI] Input closed, quitting");
                    input_open = false;
                    ui_to_app_tx.send(AppEvent::Action(Action::Quit)).await?;
                    continue;
                };

                match parse_command(&line, &state) {
                    Command::Send(action) => {
                        tracing::debug!("[UI] Sending {:?}", action);
                        ui_to_app_tx.send(AppEvent::Action(action)).await?;
                    }
                    Command::Toggle(line) => {
                        if state.toggle(line) {
                            if let Some(text) = redraw(&state) {
                                write_out(&mut output, &text).await?;
                            }
                        } else {
                            write_out(&mut output, "Nothing to translate there.\n").await?;
                        }
                    }
                    Command::Help => write_out(&mut output, &format!("{HELP}\n")).await?,
                    Command::Redraw => {
                        if let Some(text) = redraw(&state) {
                            write_out(&mut output, &text).await?;
                        }
                    }
                    Command::Unknown(input) => {
                        write_out(&mut output, &format!("Unknown command: {input} (h for help)\n"))
                            .await?;
                    }
                }
            }
        }
    }

    output.flush().await?;
    Ok(())
}

async fn write_out<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> anyhow::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use duihua_types::{LevelFilter, MenuItem, View};
    use tokio::time::timeout;

    use super::*;

    #[tokio::test]
    async fn forwards_input_as_actions() {
        let (app_tx, app_rx) = kanal::unbounded_async::<AppEvent>();
        let (ui_tx, ui_rx) = kanal::unbounded_async::<AppEvent>();
        let cancel = CancellationToken::new();

        app_tx
            .send(AppEvent::Render(View::Menu {
                filter: LevelFilter::All,
                items: vec![MenuItem {
                    key: "greet".into(),
                    title: "Greeting".into(),
                    pack: None,
                    levels: vec![1],
                }],
                progress: Vec::new(),
            }))
            .await
            .unwrap();

        let (mut writer, reader) = tokio::io::duplex(1024);
        let task = tokio::spawn(run_terminal(
            BufReader::new(reader),
            tokio::io::sink(),
            app_rx,
            ui_tx,
            cancel.clone(),
        ));

        // Let the menu arrive before typing
        tokio::time::sleep(Duration::from_millis(50)).await;
        writer.write_all(b"filter 2\n").await.unwrap();

        let event = timeout(Duration::from_secs(1), ui_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(
            event,
            AppEvent::Action(Action::SetFilter(LevelFilter::Level(2)))
        ));

        drop(writer);
        let event = timeout(Duration::from_secs(1), ui_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(event, AppEvent::Action(Action::Quit)));

        cancel.cancel();
        timeout(Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn stops_when_app_hangs_up() {
        let (app_tx, app_rx) = kanal::unbounded_async::<AppEvent>();
        let (ui_tx, _ui_rx) = kanal::unbounded_async::<AppEvent>();
        let (_writer, reader) = tokio::io::duplex(64);

        drop(app_tx);
        let result = timeout(
            Duration::from_secs(1),
            run_terminal(
                BufReader::new(reader),
                tokio::io::sink(),
                app_rx,
                ui_tx,
                CancellationToken::new(),
            ),
        )
        .await
        .unwrap();
        assert!(result.is_ok());
    }
}

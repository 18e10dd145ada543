//! Terminal frontend.
//!
//! Reads one query per line and prints the three outputs. A failed run is
//! reported and the loop continues with the next line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::pipeline::RagPipeline;

/// Process queries from `input` until EOF, writing results to `output`.
pub async fn run<R, W>(pipeline: &RagPipeline, mut input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    tracing::info!("Terminal frontend ready, waiting for queries...");

    loop {
        line.clear();
        let bytes_read = input.read_line(&mut line).await?;

        if bytes_read == 0 {
            // EOF
            tracing::info!("Input closed, shutting down");
            break;
        }

        let query = line.trim_end_matches(['\r', '\n']);
        if query.trim().is_empty() {
            continue;
        }

        let text = match pipeline.run(query).await {
            Ok(out) => format!(
                "{}\n\nRetrieval Accuracy: {}\nSummary Quality: {}\n\n",
                out.output, out.retrieval_accuracy, out.summary_quality
            ),
            Err(e) => {
                tracing::error!(query, error = %e, "Pipeline run failed");
                format!("Error: {}\n\n", e.to_user_message())
            }
        };

        output.write_all(text.as_bytes()).await?;
        output.flush().await?;
    }

    Ok(())
}

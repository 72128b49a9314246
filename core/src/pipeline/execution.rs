// order_flow/src/pipeline/execution.rs

//! Contains `Pipeline::run()`, which executes the steps in order and applies each
//! step's retry policy.

use crate::core::context::Handler;
use crate::core::context_data::ContextData;
use crate::core::control::{PipelineControl, PipelineResult};
use crate::core::step::StepDef;
use crate::error::FlowError;
use crate::pipeline::definition::Pipeline;
use tracing::{event, instrument, span, Instrument, Level};

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Executes the pipeline against the shared context `ctx_data`.
  ///
  /// Steps run strictly one after another. The first error ends the run, except
  /// inside a step with a retry policy, where retryable errors are absorbed until
  /// the policy's attempts are used up.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(
            pipeline_context_data_type = %std::any::type_name::<TData>(),
            num_steps = self.steps.len(),
        ),
        err(Display)
    )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_span = span!(
        Level::INFO,
        "pipeline_step_execution",
        step_name = step_def.name.as_str(),
        step_index = step_idx,
        optional = step_def.optional
      );

      let control = self.run_step(step_def, &ctx_data).instrument(step_span).await?;
      if control == PipelineControl::Stop {
        event!(Level::INFO, step_name = step_def.name.as_str(), "Pipeline stopped by a handler.");
        return Ok(PipelineResult::Stopped {
          step: step_def.name.clone(),
        });
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    Ok(PipelineResult::Completed)
  }

  async fn run_step(&self, step_def: &StepDef<TData>, ctx_data: &ContextData<TData>) -> Result<PipelineControl, Err> {
    let step_name = step_def.name.as_str();
    event!(Level::DEBUG, "Processing step.");

    if let Some(skip_cond_fn) = &step_def.skip_if {
      if skip_cond_fn(ctx_data.clone()) {
        event!(Level::INFO, "Step skipped due to 'skip_if' condition.");
        return Ok(PipelineControl::Continue);
      }
    }

    let handlers = match self.on.get(step_name) {
      Some(handlers) if !handlers.is_empty() => handlers,
      _ if step_def.optional => {
        event!(Level::DEBUG, "Optional step has no handlers, skipping.");
        return Ok(PipelineControl::Continue);
      }
      _ => {
        event!(Level::ERROR, "Non-optional step has no handlers.");
        return Err(Err::from(FlowError::HandlerMissing {
          step_name: step_name.to_string(),
        }));
      }
    };

    let Some(policy) = step_def.retry else {
      return self.run_handlers(handlers, ctx_data).await.inspect_err(|e| {
        event!(Level::ERROR, error = %e, "Step failed.");
      });
    };
    let retry_if = self.retry_filters.get(step_name);

    let mut attempt: u32 = 1;
    loop {
      match self.run_handlers(handlers, ctx_data).await {
        Ok(control) => {
          if attempt > 1 {
            event!(Level::INFO, attempt, "Step succeeded after retrying.");
          }
          return Ok(control);
        }
        Err(e) => {
          if !retry_if.map_or(true, |should_retry| should_retry(&e)) {
            event!(Level::ERROR, attempt, error = %e, "Step failed with a non-retryable error.");
            return Err(e);
          }
          if attempt >= policy.max_attempts {
            event!(Level::ERROR, attempts = attempt, last_error = %e, "Step failed on every attempt.");
            if policy.delay_after_last {
              self.sleeper.sleep(policy.delay_after(attempt)).await;
            }
            return Err(Err::from(FlowError::RetriesExhausted {
              step_name: step_name.to_string(),
              attempts: attempt,
            }));
          }
          let delay = policy.delay_after(attempt);
          event!(
            Level::WARN,
            attempt,
            max_attempts = policy.max_attempts,
            delay_secs = delay.as_secs_f64(),
            error = %e,
            "Attempt {} failed with error: {}. Retrying...",
            attempt,
            e
          );
          self.sleeper.sleep(delay).await;
          attempt += 1;
        }
      }
    }
  }

  async fn run_handlers(
    &self,
    handlers: &[Handler<TData, Err>],
    ctx_data: &ContextData<TData>,
  ) -> Result<PipelineControl, Err> {
    for (handler_idx, handler_fn) in handlers.iter().enumerate() {
      let handler_span = span!(Level::DEBUG, "on_handler", handler_index = handler_idx);
      match handler_fn(ctx_data.clone()).instrument(handler_span).await {
        Ok(PipelineControl::Continue) => {}
        Ok(PipelineControl::Stop) => return Ok(PipelineControl::Stop),
        Err(e) => {
          event!(Level::DEBUG, handler_index = handler_idx, error = %e, "Handler failed.");
          return Err(e);
        }
      }
    }
    Ok(PipelineControl::Continue)
  }
}

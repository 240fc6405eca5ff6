mod broadcast_pipeline;
mod cli_parse;
mod overrides;
mod passes_pipeline;
mod support;

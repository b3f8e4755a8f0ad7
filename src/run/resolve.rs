//! Configuration resolution.
//!
//! Turns the parsed flags into a `RunConfiguration`. Stages run in a fixed
//! order and the first failure stops the pipeline.

use log::debug;

use crate::config::{
    check_stdin_allowed, compose_output_groups, parallelism_hint, parse_class,
    parse_log_verbosity, resolve_passed_name, time_format, timeout_from_secs, transport_mode,
    RunConfiguration,
};
use crate::error_handling::ConfigError;
use crate::nameservers::resolve_name_servers;

use super::invocation::Invocation;
use super::Environment;

/// Resolves and validates the run configuration.
///
/// Order: scalar normalization (verbosity, class, timestamps, timeouts),
/// name server selection, output groups, then the cross-field checks
/// (transport, parallelism, stdin, leftover arguments).
///
/// # Errors
///
/// Returns the first `ConfigError` any stage raises.
pub fn resolve_configuration(
    invocation: &Invocation,
    env: &Environment,
) -> Result<RunConfiguration, ConfigError> {
    let flags = &invocation.flags;
    let module = &*invocation.module;

    let log_verbosity = parse_log_verbosity(flags.verbosity)?;
    let class = parse_class(&flags.class)?;
    let time_format = time_format(flags.nanoseconds);
    let timeout = timeout_from_secs(flags.timeout);
    let iteration_timeout = timeout_from_secs(flags.iteration_timeout);

    let name_servers = resolve_name_servers(
        flags.name_server_designation(),
        flags.iterative,
        &flags.conf_file,
    )?;

    let (result_verbosity, output_groups) =
        compose_output_groups(&flags.result_verbosity, &flags.include_fields)?;

    let transport = transport_mode(flags.tcp_only, flags.udp_only)?;
    let parallelism = parallelism_hint(flags.go_processes)?;
    check_stdin_allowed(module, &flags.input_file)?;
    let passed_name = resolve_passed_name(&flags.leftover, env.stdin_is_terminal, &flags.input_file)?;

    let config = RunConfiguration {
        module: module.name().to_string(),
        threads: flags.threads,
        parallelism,
        name_prefix: flags.prefix.clone(),
        alexa_format: flags.alexa,
        iterative: flags.iterative,
        input_file: flags.input_file.clone(),
        output_file: flags.output_file.clone(),
        metadata_file: flags.metadata_file.clone(),
        log_file: flags.log_file.clone(),
        input_handler: flags.input_handler.clone(),
        output_handler: flags.output_handler.clone(),
        timeout,
        iteration_timeout,
        retries: flags.retries,
        max_depth: flags.max_depth,
        cache_size: flags.cache_size,
        class,
        transport,
        log_verbosity,
        log_format: flags.log_format,
        result_verbosity,
        output_groups,
        name_servers,
        time_format,
        passed_name,
    };

    debug!("Resolved configuration: {:?}", config);
    Ok(config)
}

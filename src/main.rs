#![allow(clippy::suspicious_else_formatting)]

use std::path::Path;
use std::process;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::{debug, error, info, warn, LevelFilter};

use kll_animgen::Result;
use kll_animgen::animation::Animation;
use kll_animgen::config::Configuration;
use kll_animgen::device::{DeviceConfig, DeviceGeometry, PixelMap};
use kll_animgen::device::keygroup::Layout;
use kll_animgen::generators::{Params, Registry, ALL};

fn device_args<'a, 'b>(command: App<'a, 'b>) -> App<'a, 'b>
{
	command
		.arg(Arg::with_name("config")
			.short("c")
			.long("config")
			.value_name("CONFIG_JSON")
			.help("Device configuration exported by the configurator")
			.required(true))
		.arg(Arg::with_name("pixels")
			.short("p")
			.long("pixels")
			.value_name("PIXELS_JSON")
			.help("Pixel geometry exported by the configurator")
			.required(true))
		.arg(Arg::with_name("output")
			.short("o")
			.long("output")
			.value_name("DIR")
			.help("Directory for the merged configuration")
			.default_value("."))
}

fn conf_arg<'a, 'b>(required: bool) -> Arg<'a, 'b>
{
	Arg::with_name("conf")
		.short("y")
		.long("conf")
		.value_name("CONF_YAML")
		.help("Generator, trigger and layout configuration")
		.required(required)
}

fn app<'a, 'b>() -> App<'a, 'b>
{
	App::new("kll-animgen")
		.about("Generates keyboard LED animations and merges them into a KLL device configuration")
		.setting(AppSettings::SubcommandRequiredElseHelp)
		.arg(Arg::with_name("verbose")
			.short("v")
			.long("verbose")
			.global(true)
			.help("Log debug output"))
		.subcommand(device_args(SubCommand::with_name("generate")
			.about("Runs one generator, or every generator with 'all'"))
			.arg(conf_arg(false))
			.arg(Arg::with_name("generator")
				.help("Generator name, see 'list'")
				.required(true))
			.arg(Arg::with_name("params")
				.help("Colors (r,g,b, rrggbb or #rrggbb) and numbers, in the generator's order")
				.multiple(true)
				.allow_hyphen_values(true)))
		.subcommand(device_args(SubCommand::with_name("batch")
			.about("Runs every generator request in the conf file"))
			.arg(conf_arg(true)))
		.subcommand(SubCommand::with_name("init")
			.about("Writes a default conf file")
			.arg(conf_arg(false)))
		.subcommand(SubCommand::with_name("list")
			.about("Lists the available generators"))
}

fn init_logging(verbose: bool)
{
	let mut builder = pretty_env_logger::formatted_builder();

	if let Ok(filters) = std::env::var("RUST_LOG")
	{
		builder.parse_filters(&filters);
	}
	else
	{
		builder.filter_level(LevelFilter::Info);
	}

	if verbose
	{
		builder.filter_level(LevelFilter::Debug);
	}

	builder.init();
}

fn load_conf(matches: &ArgMatches) -> Result<Option<Configuration>>
{
	match matches.value_of("conf")
	{
		Some(path) => Ok(Some(Configuration::load(path)?)),
		None => Ok(None)
	}
}

/// Loads both configurator documents and derives the board geometry.
fn load_device(matches: &ArgMatches, layout: &Layout) -> Result<(DeviceConfig, DeviceGeometry)>
{
	let config = DeviceConfig::load(matches.value_of("config").unwrap_or_default())?;
	let pixels = PixelMap::load(matches.value_of("pixels").unwrap_or_default())?;
	let geometry = DeviceGeometry::new(&config, &pixels, layout);

	Ok((config, geometry))
}

fn output_stem(matches: &ArgMatches) -> String
{
	matches
		.value_of("config")
		.map(Path::new)
		.and_then(Path::file_stem)
		.map(|stem| stem.to_string_lossy().into_owned())
		.unwrap_or_else(|| "config".into())
}

fn generate(matches: &ArgMatches) -> Result<()>
{
	let conf = load_conf(matches)?;
	let layout = conf.as_ref().map(|conf| conf.layout.clone()).unwrap_or_default();
	let (mut config, geometry) = load_device(matches, &layout)?;

	let name = matches.value_of("generator").unwrap_or(ALL);
	let args: Vec<&str> = matches.values_of("params").map(Iterator::collect).unwrap_or_default();
	let params = Params::parse(&args)?;

	if name == ALL && !args.is_empty()
	{
		warn!("parameters are ignored when running every generator");
	}

	let registry = Registry::default();
	let animations = registry.invoke(name, &geometry, &params, &mut rand::thread_rng())?;

	write_merged(matches, &mut config, animations, conf.as_ref())
}

fn batch(matches: &ArgMatches) -> Result<()>
{
	let conf = load_conf(matches)?.unwrap_or_default();
	let (mut config, geometry) = load_device(matches, &conf.layout)?;

	let registry = Registry::default();
	let animations = conf.run_generators(&registry, &geometry, &mut rand::thread_rng())?;

	write_merged(matches, &mut config, animations, Some(&conf))
}

fn write_merged(
	matches: &ArgMatches,
	config: &mut DeviceConfig,
	animations: Vec<(String, Animation)>,
	conf: Option<&Configuration>) -> Result<()>
{
	let merged = config.merge_animations(animations)?;
	info!("merged {} animations", merged);

	if let Some(conf) = conf
	{
		let injected = config.inject_triggers(&conf.triggers);
		info!("added {} triggers", injected);
	}

	let output = matches.value_of("output").unwrap_or(".");
	let path = config.write_timestamped(output, &output_stem(matches))?;
	println!("{}", path.display());

	Ok(())
}

fn init(matches: &ArgMatches) -> Result<()>
{
	let path = matches
		.value_of("conf")
		.map(Into::into)
		.unwrap_or_else(Configuration::config_file_location);

	Configuration::init(&path)?;
	println!("{}", path.display());

	Ok(())
}

fn list()
{
	let registry = Registry::default();

	for name in registry.public_names()
	{
		println!("{}", name);
	}
}

fn main()
{
	let matches = app().get_matches();
	let verbose = matches.is_present("verbose")
		|| matches.subcommand().1.map_or(false, |matches| matches.is_present("verbose"));
	init_logging(verbose);

	let result = match matches.subcommand()
	{
		("generate", Some(matches)) => generate(matches),
		("batch", Some(matches)) => batch(matches),
		("init", Some(matches)) => init(matches),
		("list", _) =>
		{
			list();
			Ok(())
		},
		(command, _) =>
		{
			debug!("unhandled subcommand {}", command);
			Ok(())
		}
	};

	if let Err(error) = result
	{
		error!("{}", error);
		process::exit(1);
	}
}

use std::fmt;

use log::{debug, warn};
use serde::{Serialize, Deserialize};

use super::{DeviceConfig, Trigger};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TriggerAction
{
	#[serde(rename = "start")]
	Start,
	#[serde(rename = "stop")]
	Stop,
	#[serde(rename = "pause")]
	Pause
}

impl Default for TriggerAction
{
	fn default() -> Self
	{
		TriggerAction::Start
	}
}

impl fmt::Display for TriggerAction
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.write_str(match self
		{
			TriggerAction::Start => "start",
			TriggerAction::Stop => "stop",
			TriggerAction::Pause => "pause"
		})
	}
}

/// Binds pressing `key` on `layer` to an action on a named animation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TriggerBinding
{
	pub key: String,
	#[serde(default)]
	pub layer: u32,
	pub animation: String,
	#[serde(default)]
	pub action: TriggerAction
}

impl TriggerBinding
{
	pub fn trigger(&self) -> Trigger
	{
		Trigger
		{
			layer: self.layer,
			action: format!("A[{}]({})", self.animation, self.action)
		}
	}
}

impl DeviceConfig
{
	/// Adds a trigger to every matrix key matching each binding, skipping
	/// triggers the key already carries. Returns how many were added.
	pub fn inject_triggers(&mut self, bindings: &[TriggerBinding]) -> usize
	{
		let mut injected = 0;

		for binding in bindings
		{
			if !self.animations.contains_key(&binding.animation)
			{
				warn!("trigger on {} refers to unknown animation {}", &binding.key, &binding.animation);
			}

			let trigger = binding.trigger();
			let mut matched = false;

			for key in self.matrix
				.iter_mut()
				.filter(|key| key.key_on_layer(binding.layer) == Some(binding.key.as_str()))
			{
				matched = true;

				if key.triggers.contains(&trigger)
				{
					debug!("{} already has trigger {}", &binding.key, &trigger.action);
					continue
				}

				debug!("adding trigger {} to {} on layer {}", &trigger.action, &binding.key, binding.layer);
				key.triggers.push(trigger.clone());
				injected += 1;
			}

			if !matched
			{
				warn!("no key {} on layer {}, trigger for {} skipped", &binding.key, binding.layer, &binding.animation);
			}
		}

		injected
	}
}

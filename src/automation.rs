/// Menu automation agent driving a multi-step menu workflow in the enclosing page
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::Command;

/// Every label the workflow depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgentConfig {
    pub trigger: String,
    pub trigger_name: String,
    pub open_command: String,
    pub faction_menu: String,
    pub management_choice: String,
    pub management_menu: String,
    pub members_choice: String,
    pub members_menu: String,
    pub member_list_choice: String,
    pub member_list_menu: String,
    pub member_detail_prefix: String,
    pub remove_choice: String,
    /// Messages carrying any of these fields are someone else's traffic
    pub ignored_markers: Vec<String>,
    pub feed_url: String,
    pub id_field: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            trigger: "kick_filtered_members".to_string(),
            trigger_name: "Kick Filtered Members".to_string(),
            open_command: "faction".to_string(),
            faction_menu: "Faction Menu".to_string(),
            management_choice: "<span sort='b'/>Management".to_string(),
            management_menu: "Faction Management Menu".to_string(),
            members_choice: "Manage Members".to_string(),
            members_menu: "Manage Members".to_string(),
            member_list_choice: "Member List".to_string(),
            member_list_menu: "Member List".to_string(),
            member_detail_prefix: "Member ".to_string(),
            remove_choice: "Remove Member".to_string(),
            ignored_markers: vec!["foo".to_string()],
            feed_url: "filtered_tsa.json".to_string(),
            id_field: "User ID".to_string(),
        }
    }
}

impl AgentConfig {
    /// Field the page sets when the registered trigger fires
    pub fn trigger_field(&self) -> String {
        format!("trigger_{}", self.trigger)
    }

    pub fn registration(&self) -> Command {
        Command::RegisterTrigger {
            trigger: self.trigger.clone(),
            name: self.trigger_name.clone(),
        }
    }
}

/// Position in the workflow; the last announced menu is authoritative
///
/// ```text
/// state                     announcement        emits                         next
/// any                       trigger             sendCommand(faction)          AwaitingFactionMenu
/// any                       "Faction Menu"      choose(management)            AwaitingManagementMenu
/// any                       "Faction Mgmt Menu" choose(manage members)        AwaitingMembersMenu
/// any                       "Manage Members"    choose(member list)           AwaitingMemberList
/// any                       "Member List"       choose(<target row>)          AwaitingMemberDetail(id)
///                                               (miss: nothing, cursor+1)     AwaitingMemberList
///                                               (exhausted: nothing)          Stopped
/// AwaitingMemberDetail(id)  "Member {id}"       choose(remove), back          AwaitingMemberList
/// Stopped                   anything            nothing                       Stopped
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentState {
    Idle,
    AwaitingFactionMenu,
    AwaitingManagementMenu,
    AwaitingMembersMenu,
    AwaitingMemberList,
    AwaitingMemberDetail(String),
    /// Targets exhausted or never loaded; nothing more will be sent
    Stopped,
}

/// What an inbound message announces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    Trigger,
    Menu { name: String, choices: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Menu {
    Faction,
    Management,
    Members,
    MemberList,
    MemberDetail,
}

impl Announcement {
    /// Read the `data` object of an inbound message; anything unexpected is `None`
    pub fn parse(config: &AgentConfig, message: &Value) -> Option<Announcement> {
        let data = message.get("data")?.as_object()?;

        if config
            .ignored_markers
            .iter()
            .any(|marker| data.get(marker).is_some_and(is_truthy))
        {
            return None;
        }

        if data.get(&config.trigger_field()).is_some_and(is_truthy) {
            return Some(Announcement::Trigger);
        }

        let name = data.get("menu")?.as_str()?.to_string();
        let choices = data.get("menu_choices").map(parse_choices).unwrap_or_default();
        Some(Announcement::Menu { name, choices })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Choices arrive as a JSON-encoded string or a plain array; each choice is
/// either a label or an array whose first element is the label.
fn parse_choices(value: &Value) -> Vec<String> {
    let decoded;
    let list = match value {
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(parsed) => {
                decoded = parsed;
                &decoded
            }
            Err(e) => {
                debug!("Unreadable menu choices: {}", e);
                return Vec::new();
            }
        },
        other => other,
    };

    list.as_array()
        .map(|choices| {
            choices
                .iter()
                .filter_map(|choice| match choice {
                    Value::String(label) => Some(label.clone()),
                    Value::Array(parts) => parts.first()?.as_str().map(str::to_string),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Pull target identifiers out of the feed records, in order
pub fn parse_targets(records: &Value, id_field: &str) -> Vec<String> {
    let Some(records) = records.as_array() else {
        warn!("Target feed is not a list");
        return Vec::new();
    };

    records
        .iter()
        .filter_map(|record| match record.get(id_field) {
            Some(Value::String(id)) if !id.trim().is_empty() => Some(id.trim().to_string()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => {
                debug!("Skipping feed record without {:?}", id_field);
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct MenuAgent {
    config: AgentConfig,
    targets: Vec<String>,
    cursor: usize,
    state: AgentState,
}

impl MenuAgent {
    pub fn new(config: AgentConfig, targets: Vec<String>) -> Self {
        info!("Automation loaded {} targets", targets.len());
        MenuAgent {
            config,
            targets,
            cursor: 0,
            state: AgentState::Idle,
        }
    }

    /// An agent that will never act, used when the target feed is unavailable
    pub fn stopped(config: AgentConfig) -> Self {
        MenuAgent {
            config,
            targets: Vec::new(),
            cursor: 0,
            state: AgentState::Stopped,
        }
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// React to one inbound message; irrelevant or malformed input yields nothing
    pub fn handle(&mut self, message: &Value) -> Vec<Command> {
        if self.state == AgentState::Stopped {
            return Vec::new();
        }
        let Some(announcement) = Announcement::parse(&self.config, message) else {
            return Vec::new();
        };

        let (commands, next) = match announcement {
            Announcement::Trigger => (
                vec![Command::SendCommand {
                    command: self.config.open_command.clone(),
                }],
                AgentState::AwaitingFactionMenu,
            ),
            Announcement::Menu { name, choices } => match self.classify(&name) {
                Some(menu) => self.on_menu(menu, &choices),
                None => return Vec::new(),
            },
        };

        if next != self.state {
            info!("Automation: {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        commands
    }

    fn classify(&self, name: &str) -> Option<Menu> {
        let config = &self.config;
        if name.starts_with(&config.faction_menu) {
            Some(Menu::Faction)
        } else if name.starts_with(&config.management_menu) {
            Some(Menu::Management)
        } else if name.starts_with(&config.members_menu) {
            Some(Menu::Members)
        } else if name.starts_with(&config.member_list_menu) {
            Some(Menu::MemberList)
        } else {
            match &self.state {
                AgentState::AwaitingMemberDetail(id)
                    if name.starts_with(&format!("{}{}", config.member_detail_prefix, id)) =>
                {
                    Some(Menu::MemberDetail)
                }
                _ => None,
            }
        }
    }

    fn on_menu(&mut self, menu: Menu, choices: &[String]) -> (Vec<Command>, AgentState) {
        match menu {
            Menu::Faction => (
                vec![Command::choose(&self.config.management_choice)],
                AgentState::AwaitingManagementMenu,
            ),
            Menu::Management => (
                vec![Command::choose(&self.config.members_choice)],
                AgentState::AwaitingMembersMenu,
            ),
            Menu::Members => (
                vec![Command::choose(&self.config.member_list_choice)],
                AgentState::AwaitingMemberList,
            ),
            Menu::MemberList => self.pick_target(choices),
            Menu::MemberDetail => {
                self.cursor += 1;
                (
                    vec![
                        Command::choose(&self.config.remove_choice),
                        Command::ForceMenuBack,
                    ],
                    AgentState::AwaitingMemberList,
                )
            }
        }
    }

    fn pick_target(&mut self, choices: &[String]) -> (Vec<Command>, AgentState) {
        let Some(target) = self.targets.get(self.cursor).cloned() else {
            info!("Automation finished: no more targets");
            return (Vec::new(), AgentState::Stopped);
        };

        match choices.iter().find(|label| label.contains(&target)) {
            Some(label) => (
                vec![Command::choose(label.as_str())],
                AgentState::AwaitingMemberDetail(target),
            ),
            None => {
                // skip-on-miss: no new menu is requested, so the workflow
                // waits for the next Member List announcement
                warn!("Target {} not found in member list", target);
                self.cursor += 1;
                (Vec::new(), AgentState::AwaitingMemberList)
            }
        }
    }
}

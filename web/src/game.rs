use crate::api::HttpApi;
use crate::utils::*;
use connections_core as game;
use connections_core::protocol::{CheckResponse, DailyInfo, GameStatusResponse};
use core::time::Duration;
use game::{GameSession, GridEntry, GuessRequest, GuessResolution, Message, PuzzleApi};
use gloo::timers::callback::Timeout;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use yew::prelude::*;

type Persistence = game::PersistenceManager<LocalSnapshotStore, BrowserClock>;

const LOAD_ERROR_MESSAGE: &str = "Could not load the game";
const NEW_GAME_MESSAGE: &str = "New game started!";
const NEW_GAME_ERROR_MESSAGE: &str = "Could not start a new game";

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::SelectOutcome, E> {
    fn has_update(self) -> bool {
        self.is_ok_and(|outcome| outcome.has_update())
    }
}

fn status_class(status: game::SessionStatus) -> &'static str {
    use game::SessionStatus::*;
    match status {
        Playing => "playing",
        Won => "won",
        Lost => "lost",
    }
}

fn timeout_millis(duration: Duration) -> u32 {
    duration.as_millis().try_into().unwrap_or(u32::MAX)
}

pub(crate) enum Msg {
    Opened(Result<game::Opened, game::LoadError>),
    Toggle(String),
    DeselectAll,
    Shuffle,
    Submit,
    GuessChecked(GuessRequest, Result<CheckResponse, game::TransportError>),
    NewGame,
    NewGameLoaded(Result<GameSession, game::LoadError>),
    DailyChecked(Result<DailyInfo, game::TransportError>),
    ServerProgress(Result<GameStatusResponse, game::TransportError>),
    Show(Message),
    Expire(game::MessageToken),
}

#[derive(Properties, Clone, PartialEq)]
struct WordProps {
    word: String,
    #[prop_or_default]
    selected: bool,
    #[prop_or_default]
    locked: bool,
    callback: Callback<String>,
}

#[function_component(WordCardView)]
fn word_card_component(props: &WordProps) -> Html {
    let WordProps {
        word,
        selected,
        locked,
        callback,
    } = props.clone();

    let class = classes!(
        "grid-item",
        "word-card",
        selected.then_some("selected"),
        locked.then_some("locked"),
    );

    let onclick = {
        let word = word.clone();
        Callback::from(move |_: MouseEvent| {
            log::trace!("word click: {}", word);
            callback.emit(word.clone());
        })
    };

    html! {
        <button {class} disabled={locked} {onclick}>{word}</button>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CategoryProps {
    name: String,
    words: String,
    color: game::CategoryColor,
}

#[function_component(CategoryBlockView)]
fn category_block_component(props: &CategoryProps) -> Html {
    let class = classes!("grid-item", "category-block", props.color.class_name());

    html! {
        <div {class}>
            <strong>{&props.name}</strong>
            <div class="category-words">{&props.words}</div>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct GameProps {
    #[prop_or_default]
    pub api_base: String,
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct GameView {
    api: HttpApi,
    persistence: Persistence,
    session: Option<GameSession>,
    messages: game::MessageSlot,
    rng: SmallRng,
    loading: bool,
}

impl GameView {
    fn show(&mut self, ctx: &Context<Self>, message: Message) {
        let token = self.messages.show(message);
        let link = ctx.link().clone();
        Timeout::new(timeout_millis(game::MESSAGE_TTL), move || {
            link.send_message(Msg::Expire(token))
        })
        .forget();
    }

    fn show_later(ctx: &Context<Self>, message: Message) {
        let link = ctx.link().clone();
        Timeout::new(timeout_millis(game::FOLLOW_UP_DELAY), move || {
            link.send_message(Msg::Show(message))
        })
        .forget();
    }

    fn save(&self) {
        if let Some(session) = &self.session {
            if let Err(err) = self.persistence.save(session) {
                log::error!("failed to save game: {}", err);
            }
        }
    }

    fn request_daily_info(&self, ctx: &Context<Self>) {
        let api = self.api.clone();
        ctx.link()
            .send_future(async move { Msg::DailyChecked(api.daily_info().await) });
    }

    fn request_server_progress(&self, ctx: &Context<Self>) {
        let api = self.api.clone();
        ctx.link()
            .send_future(async move { Msg::ServerProgress(api.game_status().await) });
    }

    fn submit(&mut self, ctx: &Context<Self>) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        match session.begin_guess() {
            Ok(request) => {
                let api = self.api.clone();
                ctx.link().send_future(async move {
                    let reply = api.check_selection(request.to_wire()).await;
                    Msg::GuessChecked(request, reply)
                });
                true
            }
            Err(err) => {
                log::debug!("submit ignored: {}", err);
                false
            }
        }
    }

    fn settle(
        &mut self,
        ctx: &Context<Self>,
        request: GuessRequest,
        reply: Result<CheckResponse, game::TransportError>,
    ) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        match session.settle_guess(&request, reply) {
            Ok(GuessResolution::Checked(outcome)) => {
                log::debug!("guess verdict: {:?}", outcome.verdict);
                self.save();
                self.show(ctx, outcome.feedback);
                if let Some(follow_up) = outcome.follow_up {
                    Self::show_later(ctx, follow_up);
                }
            }
            Ok(GuessResolution::Failed(message)) => self.show(ctx, message),
            Err(err) => log::warn!("guess result dropped: {}", err),
        }
        true
    }

    fn view_grid(&self, ctx: &Context<Self>, session: &GameSession) -> Html {
        let callback = ctx.link().callback(Msg::Toggle);

        html! {
            <div class={classes!("grid", status_class(session.status()))}>
                {
                    for session.layout().entries().iter().map(|entry| match entry {
                        GridEntry::Category(index) => {
                            let category = &session.found()[*index];
                            html! {
                                <CategoryBlockView
                                    name={category.name.clone()}
                                    words={category.words.join(", ")}
                                    color={category.color}
                                />
                            }
                        }
                        GridEntry::Word(word) => html! {
                            <WordCardView
                                word={word.clone()}
                                selected={session.is_selected(word)}
                                locked={!session.is_interactive(word) || session.is_pending()}
                                callback={callback.clone()}
                            />
                        },
                    })
                }
            </div>
        }
    }

    fn view_mistakes(session: &GameSession) -> Html {
        html! {
            <div class="mistakes">
                <span>{"Mistakes remaining: "}</span>
                {
                    for (0..game::MISTAKE_BUDGET).map(|index| html! {
                        <span class={classes!("mistake", (index < session.mistakes()).then_some("used"))}/>
                    })
                }
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let api = HttpApi::new(&props.api_base);
        let persistence = Persistence::new(LocalSnapshotStore, BrowserClock);
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("shuffle seed: {}", seed);

        {
            let api = api.clone();
            let persistence = persistence.clone();
            ctx.link().send_future(async move {
                Msg::Opened(game::open_session(&api, &persistence).await)
            });
        }

        Self {
            api,
            persistence,
            session: None,
            messages: game::MessageSlot::new(),
            rng: SmallRng::seed_from_u64(seed),
            loading: true,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Opened(Ok(opened)) => {
                self.loading = false;
                if opened.is_restored() {
                    log::info!("game restored from snapshot");
                    self.request_daily_info(ctx);
                    self.request_server_progress(ctx);
                }
                self.session = Some(opened.into_session());
                true
            }
            Opened(Err(err)) => {
                log::error!("failed to load game: {}", err);
                self.loading = false;
                self.show(ctx, Message::error(LOAD_ERROR_MESSAGE));
                true
            }
            Toggle(word) => {
                let updated = self
                    .session
                    .as_mut()
                    .is_some_and(|session| session.toggle(&word).has_update());
                if updated {
                    self.save();
                }
                updated
            }
            DeselectAll => {
                let updated = self
                    .session
                    .as_mut()
                    .is_some_and(|session| session.deselect_all().has_update());
                if updated {
                    self.save();
                }
                updated
            }
            Shuffle => match self.session.as_mut() {
                Some(session) => {
                    session.shuffle(&mut self.rng);
                    self.save();
                    true
                }
                None => false,
            },
            Submit => {
                if self.loading {
                    return false;
                }
                self.submit(ctx)
            }
            GuessChecked(request, reply) => self.settle(ctx, request, reply),
            NewGame => {
                if self.loading || self.session.as_ref().is_some_and(GameSession::is_pending) {
                    log::debug!("new game ignored while a request is in flight");
                    return false;
                }
                self.loading = true;
                let api = self.api.clone();
                let persistence = self.persistence.clone();
                ctx.link().send_future(async move {
                    NewGameLoaded(game::start_new_game(&api, &persistence).await)
                });
                true
            }
            NewGameLoaded(Ok(session)) => {
                self.loading = false;
                self.session = Some(session);
                self.show(ctx, Message::success(NEW_GAME_MESSAGE));
                true
            }
            NewGameLoaded(Err(err)) => {
                log::error!("failed to start new game: {}", err);
                self.loading = false;
                self.show(ctx, Message::error(NEW_GAME_ERROR_MESSAGE));
                true
            }
            DailyChecked(Ok(info)) => {
                let notice = self
                    .session
                    .as_ref()
                    .and_then(|session| self.persistence.check_daily_rotation(session, &info));
                match notice {
                    Some(notice) => {
                        self.show(ctx, notice);
                        true
                    }
                    None => false,
                }
            }
            DailyChecked(Err(err)) => {
                log::warn!("daily info unavailable: {}", err);
                false
            }
            ServerProgress(Ok(status)) => {
                let absorbed = self
                    .session
                    .as_mut()
                    .map_or(0, |session| session.absorb_server_progress(&status));
                if absorbed > 0 {
                    log::info!("took over {} categories from the server", absorbed);
                    self.save();
                }
                absorbed > 0
            }
            ServerProgress(Err(err)) => {
                log::warn!("game status unavailable: {}", err);
                false
            }
            Show(message) => {
                self.show(ctx, message);
                true
            }
            Expire(token) => self.messages.expire(token),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let message = self.messages.current().map(|message| {
            html! {
                <div class={classes!("message", message.kind.class_name())}>{&message.text}</div>
            }
        });

        let Some(session) = &self.session else {
            return html! {
                <div class="connections">
                    <header><h1>{"Connections"}</h1></header>
                    {message}
                    <p class="loading">{if self.loading { "Loading…" } else { "" }}</p>
                </div>
            };
        };

        let can_submit = session.can_submit() && !self.loading;
        let can_deselect = !session.selection().is_empty();
        let can_shuffle = session.status().is_playing();

        let cb_shuffle = ctx.link().callback(|_| Msg::Shuffle);
        let cb_deselect = ctx.link().callback(|_| Msg::DeselectAll);
        let cb_submit = ctx.link().callback(|_| Msg::Submit);
        let cb_new_game = ctx.link().callback(|_| Msg::NewGame);

        html! {
            <div class="connections">
                <header>
                    <h1>{"Connections"}</h1>
                    <p>{"Create four groups of four!"}</p>
                    <small>{format!("{} / {} found", session.found().len(), game::CATEGORY_COUNT)}</small>
                </header>
                {message}
                {self.view_grid(ctx, session)}
                {Self::view_mistakes(session)}
                <nav>
                    <button onclick={cb_shuffle} disabled={!can_shuffle}>{"Shuffle"}</button>
                    <button onclick={cb_deselect} disabled={!can_deselect}>{"Deselect all"}</button>
                    <button class="submit" onclick={cb_submit} disabled={!can_submit}>{"Submit"}</button>
                    <button onclick={cb_new_game} disabled={self.loading}>{"New game"}</button>
                </nav>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classes_match_stylesheet() {
        assert_eq!(status_class(game::SessionStatus::Playing), "playing");
        assert_eq!(status_class(game::SessionStatus::Won), "won");
        assert_eq!(status_class(game::SessionStatus::Lost), "lost");
    }

    #[test]
    fn rejected_toggle_is_not_an_update() {
        let result: Result<game::SelectOutcome, game::GameError> =
            Err(game::GameError::AlreadyEnded);

        assert!(!result.has_update());
        assert!(Ok::<_, game::GameError>(game::SelectOutcome::Selected).has_update());
    }

    #[test]
    fn message_timers_fit_in_u32() {
        assert_eq!(timeout_millis(game::MESSAGE_TTL), 3000);
        assert_eq!(timeout_millis(game::FOLLOW_UP_DELAY), 1000);
    }
}

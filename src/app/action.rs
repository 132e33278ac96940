/// Side effects requested by the handler and executed by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FetchFooter,
    Quit,
}

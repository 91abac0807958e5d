mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod post_card;
pub use post_card::{PostCard, PostList};

mod feed;
pub use feed::FeedView;

mod verify_dialog;
pub use verify_dialog::VerifyDialog;

mod profile;
pub use profile::ProfileView;

mod messages;
pub use messages::MessagesView;

mod chat_panel;
pub use chat_panel::ChatPanel;

mod leaderboard;
pub use leaderboard::LeaderboardView;

mod livestreams;
pub use livestreams::LivestreamsView;

mod notifications;
pub use notifications::NotificationsView;

mod login_modal;
pub use login_modal::LoginModal;

mod shell;
pub use shell::Shell;

/// Default AWS CLI executable
pub const DEFAULT_AWS_CLI: &str = "aws";

/// Git executable, used only to suggest a default Cognito username
pub const GIT: &str = "git";

/// Descriptor a wrapping shell function reads export/unset lines from
pub const DEFAULT_EXPORT_FD: i32 = 3;

/// Environment variable overriding the AWS CLI executable
pub const AWS_CLI_ENV: &str = "OZ_AWS_CLI";

/// Environment variable overriding the side-channel descriptor
pub const EXPORT_FD_ENV: &str = "OZ_EXPORT_FD";

pub const AWS_PROFILE: &str = "AWS_PROFILE";
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
pub const AWS_CREDENTIAL_EXPIRATION: &str = "AWS_CREDENTIAL_EXPIRATION";

/// Discrete credential variables, in emission order
pub const CREDENTIAL_VARS: [&str; 4] = [
    AWS_ACCESS_KEY_ID,
    AWS_SECRET_ACCESS_KEY,
    AWS_SESSION_TOKEN,
    AWS_CREDENTIAL_EXPIRATION,
];

/// Every variable this tool manages, in emission order
pub const ALL_VARS: [&str; 5] = [
    AWS_PROFILE,
    AWS_ACCESS_KEY_ID,
    AWS_SECRET_ACCESS_KEY,
    AWS_SESSION_TOKEN,
    AWS_CREDENTIAL_EXPIRATION,
];

/// Page size requested from `list-user-pools` (the API requires one)
pub const USER_POOL_PAGE_SIZE: u32 = 10;

/// Length of passwords generated for newly signed-up Cognito users
pub const GENERATED_PASSWORD_LENGTH: u32 = 16;

/// Cognito error code for an unknown username
pub const USER_NOT_FOUND_CODE: &str = "UserNotFoundException";

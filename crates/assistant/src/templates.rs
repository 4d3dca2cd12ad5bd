//! Fixed response templates returned by the intent router.

pub const WORKSTATION_HELP: &str = "\
I can help you manage your QUADRAX•ML workstations:

• Create a workstation: describe its purpose and pick a function type
• Configure resources: CPU, GPU, memory and storage allocation
• Install software packages: frameworks, libraries and tools
• Monitor status: health, utilisation and running jobs

What would you like to do with your workstations?";

pub const MODEL_MANAGEMENT: &str = "\
Here's how I can help with your models:

• Register and version trained models
• Compare metrics across model versions
• Deploy a model to a workstation for inference
• Archive or roll back a model version

Which model task can I help you with?";

pub const DATA_MANAGEMENT: &str = "\
I can help you with data management:

• Upload and organise datasets
• Preview, validate and profile your data
• Connect data sources to workstations
• Control access and sharing permissions

What would you like to do with your data?";

pub const GENERIC_WELCOME: &str = "\
Welcome to the QUADRAX•ML assistant! I can help you with:

• Workstations: create, configure and monitor compute environments
• Models: register, version and deploy machine learning models
• Data: upload, organise and connect datasets
• Analysis: recommendations for resources, software, security and performance

Ask me about any of these to get started.";

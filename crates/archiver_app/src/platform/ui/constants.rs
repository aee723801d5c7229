pub const PROMPT_ARCHIVES: &str = "archiver> ";
pub const PROMPT_CREATE: &str = "archiver/new> ";
pub const LOADING_PLACEHOLDER: &str = "Loading...";
pub const NO_JOBS: &str = "No jobs found.";
pub const NO_SELECTION: &str = "Select an archive to view";

pub const HELP: &str = "\
Archives:
  refresh                 reload the archive list
  list                    show the archive list again
  search <text>           filter by name (empty clears)
  select <name>           select an archive for viewing
  deselect                clear the selection
  view                    print the replay viewer url of the selection
  rename <name>           start renaming an archive
  set <new name>          edit the rename buffer
  save | cancel           commit or abandon the rename
  delete <name>           delete an archive (asks for confirmation)
Jobs:
  jobs                    show or hide the jobs panel
  jobs refresh            reload the job list
Create archive:
  new                     open the create form
  field <field> <value>   set url, name, scope, page_limit, size_limit or depth
  scopes                  list crawl scope types
  submit                  queue the crawl job
  back                    return to the archive list
Other:
  dismiss                 clear the last notice
  help | quit";
